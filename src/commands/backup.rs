//! Backup command implementation.

use anyhow::Result;

use crate::cli::{AppsOpts, GlobalOpts};
use crate::logging::Logger;
use crate::resources::prompt::StdinConfirmer;

/// Run the backup command.
///
/// Offers to create the storage root when it is missing; declining aborts
/// the whole run before any mutation.
///
/// # Errors
///
/// Returns an error on a failed preflight guard, an unknown application
/// identifier, or a filesystem failure.
pub fn run(global: &GlobalOpts, opts: &AppsOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let confirm = StdinConfirmer;
    super::ensure_storage_root(&setup.storage_root, &confirm)?;
    setup.run_apps(opts, &confirm, log, |engine, app| engine.backup_app(app))
}
