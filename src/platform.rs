//! Platform detection for attribute-stripping strategy selection.

use std::fmt;

/// Detected operating system family.
///
/// Determines which external tools are used to strip ACLs and immutable
/// flags from paths before deleting or re-permissioning them. Detected once
/// at startup; everything downstream branches on the value, never on
/// `cfg!` probes of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux family: `setfacl` / `chattr`.
    Linux,
    /// macOS family: `chmod -N` / `chflags`.
    MacOs,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
        }
    }
}

impl Os {
    /// Detect the current platform family.
    ///
    /// Other Unix-like systems fall back to the Linux strategy; its helper
    /// binaries are probed before use, so a missing tool degrades to a no-op.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_returns_a_family() {
        let os = Os::detect();
        assert!(os == Os::Linux || os == Os::MacOs);
    }

    #[test]
    fn os_display() {
        assert_eq!(Os::Linux.to_string(), "linux");
        assert_eq!(Os::MacOs.to_string(), "macos");
    }
}
