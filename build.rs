//! Build script that injects the crate version into the binary via the
//! `CONFSYNC_VERSION` environment variable, using either a CI-provided value
//! or `git describe` for local development builds.

use std::process::Command;

fn main() {
    // Prefer CONFSYNC_VERSION env var if set (e.g., by CI release workflow),
    // otherwise fall back to git describe for local development builds.
    if let Ok(version) = std::env::var("CONFSYNC_VERSION") {
        println!("cargo:rustc-env=CONFSYNC_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=CONFSYNC_VERSION={version}");
    }

    // Re-run if git HEAD changes or env var changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=CONFSYNC_VERSION");
}
