//! Process execution seam for external tool invocation.
//!
//! The attribute-stripping strategies shell out to platform tools
//! (`setfacl`, `chattr`, `chflags`, …) through the [`Executor`] trait so
//! that unit tests can substitute a scripted implementation and assert the
//! exact commands issued without touching the real system.

use std::path::Path;
use std::process::{Command, Output};

use anyhow::{Context as _, Result};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Raw exit code, when the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over external command execution.
pub trait Executor: Send + Sync {
    /// Run a command, allowing failure (returns result without bailing).
    ///
    /// # Errors
    ///
    /// Returns an error only if the command could not be spawned at all;
    /// a non-zero exit is reported through [`ExecResult::success`].
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that runs real processes on the host system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;

        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        #[cfg(target_os = "windows")]
        let check = Command::new("where").arg(program).output();

        #[cfg(not(target_os = "windows"))]
        let check = Command::new("which").arg(program).output();

        check.is_ok_and(|o| o.status.success())
    }
}

/// Quote a path for inclusion in a command argument list.
///
/// Paths are passed as single arguments (never through a shell), so this is
/// only a lossy conversion for display and argv purposes.
#[must_use]
pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
