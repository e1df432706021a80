//! Per-application profile files.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// A relative path tracked by an application profile.
///
/// Construction rejects any path that starts with a root separator; a
/// profile declaring one is a load-time configuration error, never a
/// runtime one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrackedPath(String);

impl TrackedPath {
    /// Validate and wrap a path declared by `app`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AbsolutePath`] when `raw` starts with a root
    /// separator.
    pub fn new(app: &str, raw: &str) -> Result<Self, ConfigError> {
        if raw.starts_with('/') || raw.starts_with('\\') {
            return Err(ConfigError::AbsolutePath {
                app: app.to_string(),
                path: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// The relative path, verbatim.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declarative unit describing one application.
#[derive(Debug, Clone)]
pub struct AppProfile {
    /// Identifier, derived from the profile file stem.
    pub name: String,
    /// Display name declared inside the file.
    pub pretty_name: String,
    /// Tracked relative paths, unique and lexicographically ordered.
    pub files: BTreeSet<TrackedPath>,
}

/// Serde shape of a profile file.
#[derive(Debug, Deserialize)]
struct ProfileFile {
    name: String,
    #[serde(default)]
    configuration_files: Vec<String>,
}

/// Load one application profile from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or
/// declares a tracked path with a leading separator.
pub fn load_file(path: &Path) -> Result<AppProfile, ConfigError> {
    let app_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let parsed: ProfileFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut files = BTreeSet::new();
    for raw in &parsed.configuration_files {
        files.insert(TrackedPath::new(&app_name, raw)?);
    }

    Ok(AppProfile {
        name: app_name,
        pretty_name: parsed.name,
        files,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_temp_profile(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("git.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_valid_profile() {
        let (_dir, path) = write_temp_profile(
            "name = \"Git\"\nconfiguration_files = [\".gitconfig\", \".config/git/ignore\"]\n",
        );
        let profile = load_file(&path).unwrap();

        assert_eq!(profile.name, "git");
        assert_eq!(profile.pretty_name, "Git");
        let files: Vec<&str> = profile.files.iter().map(TrackedPath::as_str).collect();
        assert_eq!(files, vec![".config/git/ignore", ".gitconfig"]);
    }

    #[test]
    fn load_profile_without_files() {
        let (_dir, path) = write_temp_profile("name = \"Git\"\n");
        let profile = load_file(&path).unwrap();
        assert!(profile.files.is_empty());
    }

    #[test]
    fn duplicate_paths_collapse() {
        let (_dir, path) = write_temp_profile(
            "name = \"Git\"\nconfiguration_files = [\".gitconfig\", \".gitconfig\"]\n",
        );
        let profile = load_file(&path).unwrap();
        assert_eq!(profile.files.len(), 1);
    }

    #[test]
    fn absolute_path_is_a_config_error() {
        let (_dir, path) = write_temp_profile(
            "name = \"Git\"\nconfiguration_files = [\"/etc/gitconfig\"]\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::AbsolutePath { ref app, ref path }
                if app == "git" && path == "/etc/gitconfig")
        );
    }

    #[test]
    fn backslash_rooted_path_is_rejected() {
        assert!(TrackedPath::new("app", "\\windows\\path").is_err());
    }

    #[test]
    fn relative_path_is_accepted() {
        let p = TrackedPath::new("app", ".config/nested/file").unwrap();
        assert_eq!(p.as_str(), ".config/nested/file");
        assert_eq!(p.to_string(), ".config/nested/file");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let (_dir, path) = write_temp_profile("name = [unclosed\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
