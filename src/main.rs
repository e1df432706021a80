//! Binary entry point.

use anyhow::Result;
use clap::Parser;

use confsync_cli::cli::{Cli, Command};
use confsync_cli::{commands, logging};

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    let version = option_env!("CONFSYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&format!("confsync {version}"));

    match args.command {
        Command::List => commands::list::run(&args.global, &log),
        Command::Backup(opts) => commands::backup::run(&args.global, &opts, &log),
        Command::Restore(opts) => commands::restore::run(&args.global, &opts, &log),
        Command::Uninstall(opts) => commands::uninstall::run(&args.global, &opts, &log),
    }
}
