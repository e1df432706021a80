//! Primitive, side-effecting filesystem operations.
//!
//! Everything the engine does to disk goes through this module: the
//! exhaustive [`probe`] classification, the [`fs::FsOps`] mutation
//! primitives, the platform [`attr`] strategies they delegate to, and the
//! blocking [`prompt`] used to confirm destructive steps.

pub mod attr;
pub mod fs;
pub mod prompt;

use std::io;
use std::path::Path;

use crate::error::FsError;

/// Exhaustive classification of a filesystem path.
///
/// Every operation matches on this single closed set instead of scattering
/// individual `is_file`/`is_dir`/`is_symlink` probes, so overlapping states
/// (a symlink *is* also a path that exists) are decided in exactly one
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Nothing at this path, not even a broken symlink.
    Absent,
    /// A regular file (or another non-directory, non-symlink object).
    File,
    /// A real directory.
    Directory,
    /// A symlink, whether or not its target resolves.
    Symlink,
}

impl FileKind {
    /// Human word for this kind, used in confirmation prompts.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Absent => "nothing",
            Self::File => "file",
            Self::Directory => "folder",
            Self::Symlink => "link",
        }
    }
}

/// Classify `path` without following symlinks.
///
/// A symlink is classified as [`FileKind::Symlink`] regardless of whether
/// its target exists; only a path with no entry at all is
/// [`FileKind::Absent`].
///
/// # Errors
///
/// Returns an error if the path's metadata cannot be read for a reason
/// other than absence (e.g. a permission failure on a parent directory).
pub fn probe(path: &Path) -> Result<FileKind, FsError> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) => {
            let file_type = meta.file_type();
            if file_type.is_symlink() {
                Ok(FileKind::Symlink)
            } else if file_type.is_dir() {
                Ok(FileKind::Directory)
            } else {
                Ok(FileKind::File)
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileKind::Absent),
        Err(e) => Err(FsError::io("probing", path, e)),
    }
}
