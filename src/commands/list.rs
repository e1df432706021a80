//! List command implementation.

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::ProfileDb;
use crate::logging::Logger;

/// Run the list command.
///
/// # Errors
///
/// Returns an error when running as a superuser or when the profiles
/// directory cannot be loaded.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    super::ensure_not_superuser()?;

    let profiles_dir = super::resolve_profiles_dir(global)?;
    let db = ProfileDb::load(&profiles_dir)?;
    log.debug(&format!("profiles directory: {}", profiles_dir.display()));

    println!("{}", render(&db));
    Ok(())
}

/// Render the supported-application listing.
#[must_use]
pub fn render(db: &ProfileDb) -> String {
    let mut out = String::from("Supported applications:\n");
    for name in db.names() {
        out.push_str(" - ");
        out.push_str(name);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("{} applications supported", db.len()));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn db_with(names: &[&str]) -> ProfileDb {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(
                dir.path().join(format!("{name}.toml")),
                format!("name = \"{name}\"\n"),
            )
            .unwrap();
        }
        ProfileDb::load(dir.path()).unwrap()
    }

    #[test]
    fn render_lists_identifiers_sorted() {
        let db = db_with(&["vim", "git"]);
        insta::assert_snapshot!(render(&db), @r"
        Supported applications:
         - git
         - vim

        2 applications supported
        ");
    }

    #[test]
    fn render_empty_database() {
        let db = db_with(&[]);
        insta::assert_snapshot!(render(&db), @r"
        Supported applications:

        0 applications supported
        ");
    }
}
