//! Top-level subcommand orchestration.
//!
//! Each subcommand module wires the shared [`CommandSetup`] sequence
//! (preflight guard, root resolution, profile loading) to the engine.
//! All guards run before any filesystem mutation.

pub mod backup;
pub mod list;
pub mod restore;
pub mod uninstall;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::{AppsOpts, GlobalOpts};
use crate::config::{AppProfile, ProfileDb};
use crate::engine::SyncEngine;
use crate::error::{FsError, PreconditionError};
use crate::logging::Logger;
use crate::platform::Os;
use crate::resources::fs::FsOps;
use crate::resources::prompt::Confirm;

/// Environment variable overriding the storage root.
pub const STORAGE_ENV: &str = "CONFSYNC_STORAGE";

/// Environment variable overriding the profiles directory.
pub const PROFILES_ENV: &str = "CONFSYNC_PROFILES";

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded application profiles, read-only for the rest of the run.
    pub db: ProfileDb,
    /// The user's home directory.
    pub home_root: PathBuf,
    /// The storage root for this run.
    pub storage_root: PathBuf,
    /// Filesystem primitives for the detected platform.
    pub ops: FsOps,
}

impl CommandSetup {
    /// Run the superuser guard, resolve both roots, and load all profiles.
    ///
    /// # Errors
    ///
    /// Returns an error when running as a superuser, when either root
    /// cannot be resolved, or when a profile fails to load.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        ensure_not_superuser()?;

        let home_root = home_dir()?;
        let storage_root = resolve_storage_root(global)?;
        let profiles_dir = resolve_profiles_dir(global)?;

        log.stage("Loading application profiles");
        let db = ProfileDb::load(&profiles_dir)?;
        log.debug(&format!(
            "{} applications loaded from {}",
            db.len(),
            profiles_dir.display()
        ));
        log.debug(&format!("storage root: {}", storage_root.display()));

        Ok(Self {
            db,
            home_root,
            storage_root,
            ops: FsOps::for_platform(Os::detect()),
        })
    }

    /// Run `op` for every selected application, in identifier order, then
    /// print the run summary.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown application identifier or the first
    /// filesystem failure; work already done is kept.
    pub fn run_apps(
        &self,
        opts: &AppsOpts,
        confirm: &dyn Confirm,
        log: &Logger,
        op: impl Fn(&SyncEngine<'_>, &AppProfile) -> Result<(), FsError>,
    ) -> Result<()> {
        let engine = SyncEngine::new(&self.home_root, &self.storage_root, &self.ops, confirm, log);
        for app in self.db.select(&opts.apps)? {
            log.stage(&format!("{} ({})", app.pretty_name, app.name));
            op(&engine, app)?;
        }
        log.print_summary();
        Ok(())
    }
}

/// Refuse to run with superuser privileges.
///
/// The permission-hardening step would otherwise clamp system-wide files to
/// owner-only access. Checked before any mutation.
///
/// # Errors
///
/// Returns [`PreconditionError::RunningAsRoot`] when the effective UID is 0.
pub fn ensure_not_superuser() -> Result<(), PreconditionError> {
    if is_superuser() {
        return Err(PreconditionError::RunningAsRoot);
    }
    Ok(())
}

#[cfg(unix)]
fn is_superuser() -> bool {
    // SAFETY: geteuid takes no arguments, cannot fail, and has no
    // preconditions.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
const fn is_superuser() -> bool {
    false
}

/// `restore` and `uninstall` require an existing storage root.
///
/// # Errors
///
/// Returns [`PreconditionError::MissingStorageRoot`] when `root` is not an
/// existing directory.
pub fn require_storage_root(root: &Path) -> Result<(), PreconditionError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(PreconditionError::MissingStorageRoot(root.to_path_buf()))
    }
}

/// `backup` offers to create a missing storage root interactively.
///
/// # Errors
///
/// Returns [`PreconditionError::StorageRootDeclined`] when the user
/// declines (the whole run aborts), or an I/O error if creation fails.
pub fn ensure_storage_root(root: &Path, confirm: &dyn Confirm) -> Result<()> {
    if root.is_dir() {
        return Ok(());
    }
    let question = format!(
        "confsync needs a directory to store your configuration files.\n\
         Do you want to create {} now?",
        root.display()
    );
    if confirm.confirm(&question) {
        std::fs::create_dir_all(root)
            .with_context(|| format!("creating storage root {}", root.display()))?;
        Ok(())
    } else {
        Err(PreconditionError::StorageRootDeclined.into())
    }
}

/// Resolve the storage root: `--storage`, then `CONFSYNC_STORAGE`, then
/// `configs_home/` beside the installed binary.
///
/// Existence is not checked here; each operation applies its own guard.
///
/// # Errors
///
/// Returns an error if no override is given and the binary's location
/// cannot be determined.
pub fn resolve_storage_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref storage) = global.storage {
        return Ok(storage.clone());
    }
    if let Some(storage) = std::env::var_os(STORAGE_ENV) {
        return Ok(PathBuf::from(storage));
    }
    install_relative("configs_home")
}

/// Resolve the profiles directory: `--profiles`, then `CONFSYNC_PROFILES`,
/// then `profiles/` beside the installed binary.
///
/// # Errors
///
/// Returns an error if no override is given and the binary's location
/// cannot be determined.
pub fn resolve_profiles_dir(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref profiles) = global.profiles {
        return Ok(profiles.clone());
    }
    if let Some(profiles) = std::env::var_os(PROFILES_ENV) {
        return Ok(PathBuf::from(profiles));
    }
    install_relative("profiles")
}

fn install_relative(name: &str) -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the installed binary")?;
    let dir = exe
        .parent()
        .context("installed binary has no parent directory")?;
    Ok(dir.join(name))
}

fn home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .context("cannot determine the home directory (HOME is unset)")
}
