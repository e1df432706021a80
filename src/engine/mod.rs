//! The synchronization state machine.
//!
//! For every tracked file the engine derives a [`FileState`] from the live
//! filesystem, never from a cache, and performs the operation-specific
//! transition. Because the state is always re-derived, a run interrupted
//! mid-transition self-corrects on the next invocation: the engine is
//! crash-tolerant by re-evaluation, not by journaling.

pub mod paths;

pub use paths::FilePair;

use std::path::{Path, PathBuf};

use crate::config::{AppProfile, TrackedPath};
use crate::error::FsError;
use crate::logging::{FileStatus, Logger};
use crate::resources::fs::{FsOps, is_linked_to};
use crate::resources::prompt::Confirm;
use crate::resources::{FileKind, probe};

/// Live filesystem state of one tracked file, derived per operation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileState {
    /// An entry exists at the home path (a broken symlink counts).
    pub home_exists: bool,
    /// The home path is a symlink, resolving or not.
    pub home_is_symlink: bool,
    /// The home path is a symlink resolving to the same filesystem object
    /// as the storage path.
    pub home_linked_to_storage: bool,
    /// An entry exists at the storage path.
    pub storage_exists: bool,
}

impl FileState {
    /// Derive the state of `pair` from the live filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if either path cannot be classified.
    pub fn probe(pair: &FilePair) -> Result<Self, FsError> {
        let home_kind = probe(&pair.home)?;
        let storage_kind = probe(&pair.storage)?;
        let home_is_symlink = home_kind == FileKind::Symlink;
        Ok(Self {
            home_exists: home_kind != FileKind::Absent,
            home_is_symlink,
            home_linked_to_storage: home_is_symlink && is_linked_to(&pair.home, &pair.storage),
            storage_exists: storage_kind != FileKind::Absent,
        })
    }
}

/// The synchronization engine for one run.
///
/// Fully synchronous: one file, one filesystem call at a time. A declined
/// confirmation aborts only the current file's transition; the loop
/// continues with the remaining files and applications.
pub struct SyncEngine<'a> {
    home_root: PathBuf,
    storage_root: PathBuf,
    ops: &'a FsOps,
    confirm: &'a dyn Confirm,
    log: &'a Logger,
}

impl std::fmt::Debug for SyncEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("home_root", &self.home_root)
            .field("storage_root", &self.storage_root)
            .finish_non_exhaustive()
    }
}

impl<'a> SyncEngine<'a> {
    /// Create an engine over the two roots.
    #[must_use]
    pub fn new(
        home_root: &Path,
        storage_root: &Path,
        ops: &'a FsOps,
        confirm: &'a dyn Confirm,
        log: &'a Logger,
    ) -> Self {
        Self {
            home_root: home_root.to_path_buf(),
            storage_root: storage_root.to_path_buf(),
            ops,
            confirm,
            log,
        }
    }

    fn pair(&self, file: &TrackedPath) -> FilePair {
        FilePair::new(&self.home_root, &self.storage_root, file)
    }

    /// Back up every tracked file of `app`, recording each outcome.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error; files already processed stay in
    /// their new state.
    pub fn backup_app(&self, app: &AppProfile) -> Result<(), FsError> {
        for file in &app.files {
            let status = self.backup_file(file)?;
            self.log.record(&app.name, file.as_str(), status);
        }
        Ok(())
    }

    /// Restore every tracked file of `app`, recording each outcome.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error; files already processed stay in
    /// their new state.
    pub fn restore_app(&self, app: &AppProfile) -> Result<(), FsError> {
        for file in &app.files {
            let status = self.restore_file(file)?;
            self.log.record(&app.name, file.as_str(), status);
        }
        Ok(())
    }

    /// Revert every tracked file of `app` to an independent copy,
    /// recording each outcome.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error; files already processed stay in
    /// their new state.
    pub fn uninstall_app(&self, app: &AppProfile) -> Result<(), FsError> {
        for file in &app.files {
            let status = self.uninstall_file(file)?;
            self.log.record(&app.name, file.as_str(), status);
        }
        Ok(())
    }

    /// Back up one tracked file: move it into storage and leave a symlink.
    ///
    /// On success the home path is a symlink resolving to the storage path.
    /// A home symlink that does not resolve to storage (broken, or pointing
    /// somewhere else) is reported and left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error on any filesystem failure.
    pub fn backup_file(&self, file: &TrackedPath) -> Result<FileStatus, FsError> {
        let pair = self.pair(file);
        let state = FileState::probe(&pair)?;

        if !state.home_exists {
            self.log.info(&format!(
                "Doing nothing: {} does not exist",
                pair.home.display()
            ));
            return Ok(FileStatus::Unchanged);
        }
        if state.home_linked_to_storage {
            self.log.info(&format!(
                "Doing nothing: {} is already backed up to {}",
                pair.home.display(),
                pair.storage.display()
            ));
            return Ok(FileStatus::Unchanged);
        }
        if state.home_is_symlink {
            self.log.warn(&format!(
                "Doing nothing: {} is a broken or foreign link, you might want to fix it",
                pair.home.display()
            ));
            return Ok(FileStatus::Reported);
        }

        self.log.info(&format!(
            "Backing up {} to {}",
            pair.home.display(),
            pair.storage.display()
        ));

        if state.storage_exists {
            let kind = probe(&pair.storage)?;
            let question = format!(
                "A {} named {} already exists in the backup.\n\
                 Are you sure that you want to replace it?",
                kind.describe(),
                pair.storage.display()
            );
            if !self.confirm.confirm(&question) {
                self.log
                    .info(&format!("Doing nothing: kept {}", pair.storage.display()));
                return Ok(FileStatus::Declined);
            }
            self.ops.delete(&pair.storage)?;
        }

        self.ops.copy(&pair.home, &pair.storage)?;
        self.ops.delete(&pair.home)?;
        self.ops.link(&pair.storage, &pair.home)?;
        Ok(FileStatus::Synced)
    }

    /// Restore one tracked file: link the home path to the stored copy.
    ///
    /// On success the home path is a symlink resolving to the storage path;
    /// the stored content is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error on any filesystem failure.
    pub fn restore_file(&self, file: &TrackedPath) -> Result<FileStatus, FsError> {
        let pair = self.pair(file);
        let state = FileState::probe(&pair)?;

        if !state.storage_exists {
            self.log.info(&format!(
                "Doing nothing: {} does not exist",
                pair.storage.display()
            ));
            return Ok(FileStatus::Unchanged);
        }
        if state.home_linked_to_storage {
            self.log.info(&format!(
                "Doing nothing: {} is already linked by {}",
                pair.storage.display(),
                pair.home.display()
            ));
            return Ok(FileStatus::Unchanged);
        }

        self.log.info(&format!("Restoring {file} ..."));

        if state.home_exists {
            let kind = probe(&pair.home)?;
            let question = format!(
                "You already have a {} named {} in your home.\n\
                 Do you want to replace it with your backup?",
                kind.describe(),
                file
            );
            if !self.confirm.confirm(&question) {
                self.log
                    .info(&format!("Doing nothing: kept {}", pair.home.display()));
                return Ok(FileStatus::Declined);
            }
            self.ops.delete(&pair.home)?;
        }

        self.ops.link(&pair.storage, &pair.home)?;
        Ok(FileStatus::Synced)
    }

    /// Revert one tracked file: replace the home path with an independent
    /// copy of the stored content.
    ///
    /// On success the home path exists and is not a symlink; the storage
    /// path is untouched and retained.
    ///
    /// # Errors
    ///
    /// Returns an error on any filesystem failure.
    pub fn uninstall_file(&self, file: &TrackedPath) -> Result<FileStatus, FsError> {
        let pair = self.pair(file);
        let state = FileState::probe(&pair)?;

        if !state.storage_exists {
            self.log.info(&format!(
                "Doing nothing: {} does not exist",
                pair.storage.display()
            ));
            return Ok(FileStatus::Unchanged);
        }

        if state.home_exists && !state.home_linked_to_storage {
            let kind = probe(&pair.home)?;
            let question = format!(
                "You have a {} named {} in your home that does not point at your backup.\n\
                 Do you want to replace it with a copy of the backup?",
                kind.describe(),
                file
            );
            if !self.confirm.confirm(&question) {
                self.log
                    .info(&format!("Doing nothing: kept {}", pair.home.display()));
                return Ok(FileStatus::Declined);
            }
        }

        self.log.info(&format!("Reverting {file} ..."));

        if state.home_exists {
            self.ops.delete(&pair.home)?;
        }
        self.ops.copy(&pair.storage, &pair.home)?;
        Ok(FileStatus::Synced)
    }
}
