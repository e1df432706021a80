//! Uninstall (revert) command implementation.

use anyhow::Result;

use crate::cli::{AppsOpts, GlobalOpts};
use crate::logging::Logger;
use crate::resources::prompt::StdinConfirmer;

/// Run the uninstall command.
///
/// Reverts every tracked file of the selected applications to an
/// independent copy of its stored content. The storage root must already
/// exist, and it is retained afterwards: uninstall never removes the
/// backup.
///
/// # Errors
///
/// Returns an error on a failed preflight guard, an unknown application
/// identifier, or a filesystem failure.
pub fn run(global: &GlobalOpts, opts: &AppsOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    super::require_storage_root(&setup.storage_root)?;
    let confirm = StdinConfirmer;
    setup.run_apps(opts, &confirm, log, |engine, app| engine.uninstall_app(app))
}
