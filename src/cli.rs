//! Command-line surface.

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the synchronization engine.
#[derive(Parser, Debug)]
#[command(
    name = "confsync",
    about = "Configuration-file synchronization engine",
    version
)]
pub struct Cli {
    /// Selected operation.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the storage root directory
    #[arg(short, long, global = true)]
    pub storage: Option<std::path::PathBuf>,

    /// Override the application profiles directory
    #[arg(long, global = true)]
    pub profiles: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported applications
    List,
    /// Move application config files into the storage root and leave links
    Backup(AppsOpts),
    /// Link application config files back from the storage root
    Restore(AppsOpts),
    /// Replace links with independent copies of the stored files
    Uninstall(AppsOpts),
}

/// Application selection shared by the three sync operations.
#[derive(Parser, Debug, Clone)]
pub struct AppsOpts {
    /// Application identifiers (case-sensitive)
    #[arg(required = true)]
    pub apps: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list() {
        let cli = Cli::parse_from(["confsync", "list"]);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn parse_backup_with_apps() {
        let cli = Cli::parse_from(["confsync", "backup", "git", "vim"]);
        assert!(matches!(&cli.command, Command::Backup(_)));
        if let Command::Backup(opts) = cli.command {
            assert_eq!(opts.apps, vec!["git", "vim"]);
        }
    }

    #[test]
    fn parse_backup_requires_apps() {
        let result = Cli::try_parse_from(["confsync", "backup"]);
        assert!(result.is_err(), "backup without apps should fail to parse");
    }

    #[test]
    fn parse_restore() {
        let cli = Cli::parse_from(["confsync", "restore", "git"]);
        assert!(matches!(cli.command, Command::Restore(_)));
    }

    #[test]
    fn parse_uninstall() {
        let cli = Cli::parse_from(["confsync", "uninstall", "git"]);
        assert!(matches!(cli.command, Command::Uninstall(_)));
    }

    #[test]
    fn parse_storage_override() {
        let cli = Cli::parse_from(["confsync", "--storage", "/tmp/store", "backup", "git"]);
        assert_eq!(
            cli.global.storage,
            Some(std::path::PathBuf::from("/tmp/store"))
        );
    }

    #[test]
    fn parse_storage_override_short() {
        let cli = Cli::parse_from(["confsync", "backup", "-s", "/tmp/store", "git"]);
        assert_eq!(
            cli.global.storage,
            Some(std::path::PathBuf::from("/tmp/store"))
        );
    }

    #[test]
    fn parse_profiles_override() {
        let cli = Cli::parse_from(["confsync", "--profiles", "/tmp/profiles", "list"]);
        assert_eq!(
            cli.global.profiles,
            Some(std::path::PathBuf::from("/tmp/profiles"))
        );
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["confsync", "-v", "list"]);
        assert!(cli.verbose);
    }

    #[test]
    fn unknown_operation_fails_to_parse() {
        let result = Cli::try_parse_from(["confsync", "frobnicate"]);
        assert!(result.is_err(), "unknown subcommand should fail");
    }
}
