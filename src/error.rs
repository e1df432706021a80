//! Domain-specific error types for the synchronization engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`ConfigError`], [`FsError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! SyncError
//! ├── Config(ConfigError)           — profile loading and validation
//! ├── Precondition(PreconditionError) — guards checked before any mutation
//! └── Fs(FsError)                   — delete/copy/link/permission failures
//! ```
//!
//! A declined confirmation is deliberately *not* represented here: it is a
//! control-flow outcome, reported through the logger, never an error.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the synchronization engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration-related error (profile parsing, path validation).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A preflight guard failed before any filesystem mutation.
    #[error("Precondition error: {0}")]
    Precondition(#[from] PreconditionError),

    /// Filesystem operation error (delete, copy, link, permissions).
    #[error("Filesystem error: {0}")]
    Fs(#[from] FsError),
}

/// Errors that arise from application profile loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A profile declared a tracked path with a leading root separator.
    #[error("unsupported absolute path '{path}' declared by application '{app}'")]
    AbsolutePath {
        /// Identifier of the offending application.
        app: String,
        /// The declared path, verbatim.
        path: String,
    },

    /// A requested application identifier matched no loaded profile.
    #[error("unknown application '{0}'")]
    UnknownApp(String),

    /// A profile file contains a syntax error that prevents parsing.
    #[error("invalid profile file {path}: {source}")]
    Parse {
        /// Path to the file that could not be parsed.
        path: String,
        /// Underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// An I/O error occurred while reading a profile file or directory.
    #[error("IO error reading profile {path}: {source}")]
    Io {
        /// Path to the file or directory that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors from guards that run before any mutation.
#[derive(Error, Debug)]
pub enum PreconditionError {
    /// The process is running with an effective UID of 0.
    #[error("running as a superuser is useless and dangerous, don't do it")]
    RunningAsRoot,

    /// `restore`/`uninstall` need an existing storage root.
    #[error(
        "unable to find the storage root {}\n\
         you might want to back up some files or get your storage directory synced first",
        .0.display()
    )]
    MissingStorageRoot(PathBuf),

    /// The user declined to create the storage root during `backup`.
    #[error("a storage directory is required, nothing to do without one")]
    StorageRootDeclined,
}

/// Errors from primitive filesystem operations.
#[derive(Error, Debug)]
pub enum FsError {
    /// A copy source is neither a regular file nor a directory
    /// (e.g., a dangling symlink).
    #[error("unsupported file type: {}", .0.display())]
    UnsupportedFileType(PathBuf),

    /// An OS-level failure during delete/copy/link/permission hardening.
    ///
    /// Not individually caught or retried; it propagates and terminates
    /// processing of the current file immediately.
    #[error("{} {}: {}", .action, .path.display(), .source)]
    Io {
        /// What the operation was doing, e.g. `"removing"`.
        action: &'static str,
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap an I/O error with the operation and path it occurred on.
    #[must_use]
    pub fn io(action: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}
