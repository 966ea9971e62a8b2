//! Relog Changelog - keep-a-changelog data model and Markdown codec
//!
//! This crate provides the structured changelog representation, a strict
//! parser/renderer for the four-category keep-a-changelog format, and the
//! file load/save boundary.

pub mod error;
pub mod formatter;
pub mod parser;
pub mod types;

pub use error::{ChangelogError, Result};
pub use formatter::render;
pub use parser::parse;
pub use types::{Category, Changelog, Release, ReleaseMetadata};

use std::path::Path;

/// Load a changelog from disk.
///
/// A missing file is treated as an empty changelog; any other failure
/// (unreadable file, malformed content) propagates.
pub fn load(path: &Path) -> Result<Changelog> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "changelog file not found, starting empty");
            Ok(Changelog::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Render a changelog and overwrite the file at `path`.
pub fn save(path: &Path, changelog: &Changelog) -> Result<()> {
    std::fs::write(path, render(changelog))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let changelog = load(&dir.path().join("CHANGELOG.md")).unwrap();
        assert!(changelog.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");

        let mut changelog = Changelog::new();
        let mut release = Release::new(ReleaseMetadata {
            version: "1.0.0".to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            url: Some("https://gl/mr/5".to_string()),
        });
        release.add_entry(Category::Added, "[42](https://gl/mr/42) Add widget support (@alice)");
        changelog.upsert(release);

        save(&path, &changelog).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, changelog);
    }
}
