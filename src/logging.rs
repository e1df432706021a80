//! Logging facade with per-file outcome collection and a run summary.
//!
//! All progress messages go through [`Logger`], which forwards them to
//! [`tracing`] and records the outcome of every processed tracked file so a
//! summary can be printed at the end of the run. The subscriber installed by
//! [`init_subscriber`] writes plain, untimed lines to the console and honours
//! `RUST_LOG` for filtering.

use std::sync::Mutex;

/// Outcome of processing one tracked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The operation performed its transition.
    Synced,
    /// The file was already in the desired state, or there was nothing to
    /// act on; no mutation occurred.
    Unchanged,
    /// The user declined a confirmation; this file was skipped.
    Declined,
    /// A condition was reported (e.g. a broken symlink) and left untouched.
    Reported,
}

/// One recorded per-file outcome.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Application identifier the file belongs to.
    pub app: String,
    /// Tracked relative path.
    pub file: String,
    /// What happened to it.
    pub status: FileStatus,
}

/// Structured logger with outcome collection.
#[derive(Debug, Default)]
pub struct Logger {
    entries: Mutex<Vec<FileEntry>>,
}

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "confsync::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (hidden unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record the outcome of one tracked file.
    pub fn record(&self, app: &str, file: &str, status: FileStatus) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(FileEntry {
                app: app.to_string(),
                file: file.to_string(),
                status,
            });
    }

    /// Number of recorded entries with the given status.
    #[must_use]
    pub fn count(&self, status: FileStatus) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|e| e.status == status)
            .count()
    }

    /// Return a clone of all recorded entries (test-only).
    #[cfg(test)]
    pub(crate) fn entries(&self) -> Vec<FileEntry> {
        self.entries
            .lock()
            .map_or_else(|_| vec![], |g| g.clone())
    }

    /// Print the run summary.
    pub fn print_summary(&self) {
        let synced = self.count(FileStatus::Synced);
        let unchanged = self.count(FileStatus::Unchanged);
        let declined = self.count(FileStatus::Declined);
        let reported = self.count(FileStatus::Reported);

        let mut parts = vec![format!("{synced} synced"), format!("{unchanged} unchanged")];
        if declined > 0 {
            parts.push(format!("{declined} declined"));
        }
        if reported > 0 {
            parts.push(format!("{reported} reported"));
        }
        self.stage(&parts.join(", "));
    }
}

/// Install the global tracing subscriber for console output.
///
/// `RUST_LOG` overrides the default level; `verbose` raises the default
/// from `info` to `debug`. Must be called at most once per process;
/// library tests never call it.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(false)
        .without_time()
        .init();
}
