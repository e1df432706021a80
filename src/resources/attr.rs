//! Platform strategies for stripping ACLs and immutable flags.
//!
//! Backed-up files are hardened to owner-only permissions, and deletes must
//! succeed even on paths a previous run (or the user) marked immutable. Both
//! concerns are platform-specific, so they live behind one capability trait
//! with an implementation per OS family, selected once at startup.
//!
//! The strip commands are best-effort: the underlying tools ignore paths
//! that carry no ACLs or flags, and a missing helper binary simply degrades
//! to a no-op. Failures are logged at debug level and never abort the run.

use std::path::Path;
use std::sync::Arc;

use crate::exec::{Executor, path_arg};
use crate::platform::Os;

/// Makes a path owner-exclusive and removable.
pub trait AttrStripper: Send + Sync {
    /// Remove platform ACLs from `path` and everything below it.
    fn strip_acl(&self, path: &Path);

    /// Remove immutable flags from `path` and everything below it.
    fn strip_immutable(&self, path: &Path);
}

/// Select the strategy for the detected platform family.
#[must_use]
pub fn for_os(os: Os, exec: Arc<dyn Executor>) -> Box<dyn AttrStripper> {
    match os {
        Os::Linux => Box::new(LinuxAttrStripper { exec }),
        Os::MacOs => Box::new(MacAttrStripper { exec }),
    }
}

fn strip_with(exec: &dyn Executor, program: &str, args: &[&str], path: &Path) {
    if !exec.which(program) {
        return;
    }
    let path = path_arg(path);
    let mut argv: Vec<&str> = args.to_vec();
    argv.push(&path);
    if let Err(e) = exec.run_unchecked(program, &argv) {
        tracing::debug!("{program} on {path} could not run: {e:#}");
    }
}

/// Linux strategy: POSIX ACLs via `setfacl`, immutability via `chattr`.
pub struct LinuxAttrStripper {
    exec: Arc<dyn Executor>,
}

impl std::fmt::Debug for LinuxAttrStripper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinuxAttrStripper").finish_non_exhaustive()
    }
}

impl AttrStripper for LinuxAttrStripper {
    fn strip_acl(&self, path: &Path) {
        strip_with(self.exec.as_ref(), "setfacl", &["-R", "-b"], path);
    }

    fn strip_immutable(&self, path: &Path) {
        strip_with(self.exec.as_ref(), "chattr", &["-R", "-i"], path);
    }
}

/// macOS strategy: extended ACLs via `chmod -N`, `uchg` flags via `chflags`.
pub struct MacAttrStripper {
    exec: Arc<dyn Executor>,
}

impl std::fmt::Debug for MacAttrStripper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacAttrStripper").finish_non_exhaustive()
    }
}

impl AttrStripper for MacAttrStripper {
    fn strip_acl(&self, path: &Path) {
        strip_with(self.exec.as_ref(), "chmod", &["-R", "-N"], path);
    }

    fn strip_immutable(&self, path: &Path) {
        strip_with(self.exec.as_ref(), "chflags", &["-R", "nouchg"], path);
    }
}

/// No-op stripper for tests and platforms with nothing to strip.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAttrStripper;

impl AttrStripper for NullAttrStripper {
    fn strip_acl(&self, _path: &Path) {}

    fn strip_immutable(&self, _path: &Path) {}
}
