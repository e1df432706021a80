//! Restore command implementation.

use anyhow::Result;

use crate::cli::{AppsOpts, GlobalOpts};
use crate::logging::Logger;
use crate::resources::prompt::StdinConfirmer;

/// Run the restore command.
///
/// The storage root must already exist; its absence is fatal for the whole
/// run.
///
/// # Errors
///
/// Returns an error on a failed preflight guard, an unknown application
/// identifier, or a filesystem failure.
pub fn run(global: &GlobalOpts, opts: &AppsOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    super::require_storage_root(&setup.storage_root)?;
    let confirm = StdinConfirmer;
    setup.run_apps(opts, &confirm, log, |engine, app| engine.restore_app(app))
}
