// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed home/storage/profiles layout and a
// scripted confirmer so each integration test can set up an isolated
// environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use confsync_cli::config::ProfileDb;
use confsync_cli::engine::SyncEngine;
use confsync_cli::logging::Logger;
use confsync_cli::resources::attr::NullAttrStripper;
use confsync_cli::resources::fs::{FsOps, Hardening};
use confsync_cli::resources::prompt::Confirm;

/// A `Confirm` implementation that replays scripted answers in FIFO order
/// and declines once the script is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    calls: AtomicUsize,
}

impl ScriptedConfirmer {
    /// Create a confirmer that answers with `answers`, in order.
    pub fn with(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a confirmer for flows that must not prompt; any call
    /// declines, and [`Self::calls`] exposes whether one happened.
    pub fn none() -> Self {
        Self::default()
    }

    /// Total number of prompts issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Confirm for ScriptedConfirmer {
    fn confirm(&self, _question: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .expect("confirmer mutex poisoned")
            .pop_front()
            .unwrap_or(false)
    }
}

/// An isolated home/storage/profiles layout backed by a
/// [`tempfile::TempDir`], deleted automatically on drop.
pub struct SyncFixture {
    /// Temporary directory containing `home/`, `storage/` and `profiles/`.
    pub root: tempfile::TempDir,
    /// Filesystem primitives with attribute stripping disabled, so tests
    /// never shell out.
    pub ops: FsOps,
    /// Outcome-collecting logger shared by the flows under test.
    pub log: Logger,
}

impl SyncFixture {
    /// Create a fixture with empty `home/`, `storage/` and `profiles/`.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        for dir in ["home", "storage", "profiles"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("create fixture dir");
        }
        Self {
            root,
            ops: FsOps::new(Box::new(NullAttrStripper), Hardening::default()),
            log: Logger::new(),
        }
    }

    /// Path of the simulated home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Path of the storage root.
    pub fn storage(&self) -> PathBuf {
        self.root.path().join("storage")
    }

    /// Path of the profiles directory.
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.path().join("profiles")
    }

    /// Write `profiles/<stem>.toml`.
    pub fn write_profile(&self, stem: &str, content: &str) {
        std::fs::write(self.profiles_dir().join(format!("{stem}.toml")), content)
            .expect("write profile");
    }

    /// Write a file under the simulated home, creating parents.
    pub fn write_home_file(&self, rel: &str, content: &str) {
        let path = self.home().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create home parent");
        }
        std::fs::write(path, content).expect("write home file");
    }

    /// Write a file under the storage root, creating parents.
    pub fn write_storage_file(&self, rel: &str, content: &str) {
        let path = self.storage().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create storage parent");
        }
        std::fs::write(path, content).expect("write storage file");
    }

    /// Load the profile database from the fixture's profiles directory.
    pub fn load_db(&self) -> ProfileDb {
        ProfileDb::load(&self.profiles_dir()).expect("load profiles")
    }

    /// Build an engine over the fixture's roots.
    pub fn engine<'a>(&'a self, confirm: &'a dyn Confirm) -> SyncEngine<'a> {
        SyncEngine::new(&self.home(), &self.storage(), &self.ops, confirm, &self.log)
    }
}
