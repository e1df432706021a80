//! Filesystem mutation primitives: delete, copy, link, harden.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::FsError;
use crate::exec::SystemExecutor;
use crate::platform::Os;

use super::attr::{self, AttrStripper};
use super::{FileKind, probe};

/// Owner-exclusive permission modes applied when hardening.
///
/// Plain immutable values handed to [`FsOps`] at construction; nothing else
/// in the crate carries permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hardening {
    /// Mode applied to regular files.
    pub file_mode: u32,
    /// Mode applied to directories.
    pub dir_mode: u32,
}

impl Default for Hardening {
    fn default() -> Self {
        Self {
            file_mode: 0o600,
            dir_mode: 0o700,
        }
    }
}

/// Filesystem primitives bound to a platform attribute-stripping strategy.
pub struct FsOps {
    attr: Box<dyn AttrStripper>,
    hardening: Hardening,
}

impl fmt::Debug for FsOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsOps")
            .field("hardening", &self.hardening)
            .finish_non_exhaustive()
    }
}

impl FsOps {
    /// Create primitives with an explicit strategy and hardening modes.
    #[must_use]
    pub fn new(attr: Box<dyn AttrStripper>, hardening: Hardening) -> Self {
        Self { attr, hardening }
    }

    /// Create primitives for the detected platform, shelling out through
    /// the real system executor.
    #[must_use]
    pub fn for_platform(os: Os) -> Self {
        Self::new(
            attr::for_os(os, Arc::new(SystemExecutor)),
            Hardening::default(),
        )
    }

    /// Delete the file, directory, or symlink at `path`.
    ///
    /// No-op when the path is absent. ACLs and immutable flags are stripped
    /// recursively first so neither can block the removal. The operation
    /// acts on the path itself: a symlink is unlinked, never dereferenced
    /// into its target.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be classified or removed.
    pub fn delete(&self, path: &Path) -> Result<(), FsError> {
        let kind = probe(path)?;
        if kind == FileKind::Absent {
            return Ok(());
        }

        self.attr.strip_acl(path);
        self.attr.strip_immutable(path);

        if kind == FileKind::Directory {
            std::fs::remove_dir_all(path).map_err(|e| FsError::io("removing tree", path, e))
        } else {
            std::fs::remove_file(path).map_err(|e| FsError::io("removing", path, e))
        }
    }

    /// Copy a file or a directory (recursively) from `src` to `dst`.
    ///
    /// Both paths must be absolute, include the final file name, and carry
    /// no trailing separator. Missing parent directories of `dst` are
    /// created, and `dst` is hardened recursively afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::UnsupportedFileType`] when `src` resolves to
    /// neither a regular file nor a directory (e.g. a dangling symlink),
    /// or an I/O error from the copy or the hardening pass.
    pub fn copy(&self, src: &Path, dst: &Path) -> Result<(), FsError> {
        debug_assert!(
            src.is_absolute() && dst.is_absolute(),
            "copy requires absolute paths"
        );
        debug_assert!(
            !has_trailing_separator(src) && !has_trailing_separator(dst),
            "copy requires paths without trailing separators"
        );

        ensure_parent_dir(dst)?;

        if src.is_file() {
            std::fs::copy(src, dst).map_err(|e| FsError::io("copying to", dst, e))?;
        } else if src.is_dir() {
            copy_dir_recursive(src, dst)?;
        } else {
            return Err(FsError::UnsupportedFileType(src.to_path_buf()));
        }

        self.harden(dst)
    }

    /// Create a symlink at `link` pointing to `target`.
    ///
    /// `target` must exist. Missing parent directories of `link` are
    /// created and `target` is hardened recursively before the link
    /// appears.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directories, the hardening pass, or
    /// the symlink creation fail.
    pub fn link(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        debug_assert!(
            probe(target).is_ok_and(|k| k != FileKind::Absent),
            "link requires an existing target"
        );

        ensure_parent_dir(link)?;
        self.harden(target)?;
        symlink(target, link)
    }

    /// Recursively restrict `path` to owner-only access.
    ///
    /// Regular files get [`Hardening::file_mode`], directories get
    /// [`Hardening::dir_mode`]. Immutable flags are stripped first so the
    /// permission change cannot be refused.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::UnsupportedFileType`] when `path` resolves to
    /// neither a file nor a directory, or an I/O error from a permission
    /// change.
    pub fn harden(&self, path: &Path) -> Result<(), FsError> {
        self.attr.strip_immutable(path);

        if path.is_file() {
            set_mode(path, self.hardening.file_mode)
        } else if path.is_dir() {
            self.harden_tree(path)
        } else {
            Err(FsError::UnsupportedFileType(path.to_path_buf()))
        }
    }

    fn harden_tree(&self, dir: &Path) -> Result<(), FsError> {
        set_mode(dir, self.hardening.dir_mode)?;
        for entry in
            std::fs::read_dir(dir).map_err(|e| FsError::io("reading directory", dir, e))?
        {
            let entry = entry.map_err(|e| FsError::io("reading entry in", dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                self.harden_tree(&path)?;
            } else {
                set_mode(&path, self.hardening.file_mode)?;
            }
        }
        Ok(())
    }
}

/// True iff `a` is a symlink, `b` exists, and both resolve to the same
/// underlying filesystem object.
#[must_use]
pub fn is_linked_to(a: &Path, b: &Path) -> bool {
    if !matches!(probe(a), Ok(FileKind::Symlink)) {
        return false;
    }
    same_object(a, b)
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), FsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| FsError::io("creating parent", parent, e))?;
    }
    Ok(())
}

/// Recursively copy a directory tree.
///
/// Symlinks within the source tree are followed: directory symlinks are
/// recursed into and file symlinks have their content copied, so the
/// destination contains no links back into the source.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), FsError> {
    std::fs::create_dir_all(dst).map_err(|e| FsError::io("creating directory", dst, e))?;
    for entry in std::fs::read_dir(src).map_err(|e| FsError::io("reading directory", src, e))? {
        let entry = entry.map_err(|e| FsError::io("reading entry in", src, e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)
                .map_err(|e| FsError::io("copying to", &dst_path, e))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn same_object(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_object(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), FsError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| FsError::io("setting permissions on", path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), FsError> {
    Ok(())
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Result<(), FsError> {
    std::os::unix::fs::symlink(target, link)
        .map_err(|e| FsError::io("creating symlink at", link, e))
}

#[cfg(not(unix))]
fn symlink(_target: &Path, link: &Path) -> Result<(), FsError> {
    Err(FsError::io(
        "creating symlink at",
        link,
        std::io::Error::from(std::io::ErrorKind::Unsupported),
    ))
}

fn has_trailing_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR)
}
