//! Declarative application profiles.
//!
//! Each application is described by one TOML file in the profiles
//! directory; the file stem is the application identifier. The whole set is
//! loaded once per run into a [`ProfileDb`] and is read-only thereafter.

pub mod profiles;

pub use profiles::{AppProfile, TrackedPath};

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// All loaded application profiles, keyed by identifier.
///
/// Backed by a `BTreeMap` so iteration is always in lexicographic
/// identifier order, which is the processing order of a run.
#[derive(Debug, Default)]
pub struct ProfileDb {
    apps: BTreeMap<String, AppProfile>,
}

impl ProfileDb {
    /// Load every `*.toml` profile in `dir`.
    ///
    /// A missing directory yields an empty database; a malformed profile
    /// (bad TOML, or a tracked path with a leading separator) fails the
    /// whole load.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or any profile
    /// file fails to load.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut apps = BTreeMap::new();
        if !dir.is_dir() {
            return Ok(Self { apps });
        }

        for entry in std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            path: dir.display().to_string(),
            source: e,
        })? {
            let entry = entry.map_err(|e| ConfigError::Io {
                path: dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                let profile = profiles::load_file(&path)?;
                apps.insert(profile.name.clone(), profile);
            }
        }

        Ok(Self { apps })
    }

    /// Look up one profile by identifier (case-sensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AppProfile> {
        self.apps.get(name)
    }

    /// All identifiers, in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    /// Number of loaded applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Whether no applications are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Resolve the requested identifiers to profiles, deduplicated and in
    /// lexicographic order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownApp`] for the first identifier that
    /// matches no loaded profile.
    pub fn select(&self, requested: &[String]) -> Result<Vec<&AppProfile>, ConfigError> {
        let unique: std::collections::BTreeSet<&str> =
            requested.iter().map(String::as_str).collect();
        unique
            .into_iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| ConfigError::UnknownApp(name.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn write_profile(dir: &Path, stem: &str, content: &str) {
        std::fs::write(dir.join(format!("{stem}.toml")), content).unwrap();
    }

    #[test]
    fn load_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = ProfileDb::load(&dir.path().join("nope")).unwrap();
        assert!(db.is_empty());
    }

    #[test]
    fn load_iterates_in_lexicographic_order() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "zsh", "name = \"Zsh\"\nconfiguration_files = [\".zshrc\"]\n");
        write_profile(dir.path(), "git", "name = \"Git\"\nconfiguration_files = [\".gitconfig\"]\n");
        write_profile(dir.path(), "vim", "name = \"Vim\"\nconfiguration_files = [\".vimrc\"]\n");

        let db = ProfileDb::load(dir.path()).unwrap();
        let names: Vec<&str> = db.names().collect();
        assert_eq!(names, vec!["git", "vim", "zsh"]);
    }

    #[test]
    fn load_skips_non_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "git", "name = \"Git\"\n");
        std::fs::write(dir.path().join("README.md"), "not a profile").unwrap();

        let db = ProfileDb::load(dir.path()).unwrap();
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn load_fails_on_absolute_tracked_path() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(
            dir.path(),
            "git",
            "name = \"Git\"\nconfiguration_files = [\"/etc/gitconfig\"]\n",
        );

        let err = ProfileDb::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::AbsolutePath { .. }));
    }

    #[test]
    fn select_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "git", "name = \"Git\"\n");

        let db = ProfileDb::load(dir.path()).unwrap();
        assert!(db.select(&["git".to_string()]).is_ok());
        let err = db.select(&["Git".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownApp(name) if name == "Git"));
    }

    #[test]
    fn select_dedupes_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "git", "name = \"Git\"\n");
        write_profile(dir.path(), "vim", "name = \"Vim\"\n");

        let db = ProfileDb::load(dir.path()).unwrap();
        let selected = db
            .select(&["vim".to_string(), "git".to_string(), "vim".to_string()])
            .unwrap();
        let names: Vec<&str> = selected.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["git", "vim"]);
    }
}
