//! Changelog types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Changelog category for a change merge request.
///
/// Declaration order is the classification priority order: when a merge
/// request carries several category labels, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// New functionality
    Added,
    /// Bug fixes
    Fixed,
    /// Changes to existing functionality
    Changed,
    /// Soon-to-be-removed functionality
    Deprecated,
}

impl Category {
    /// All categories, in classification priority order.
    pub const PRIORITY: [Category; 4] = [
        Category::Added,
        Category::Fixed,
        Category::Changed,
        Category::Deprecated,
    ];

    /// The GitLab label spelling for this category (case-sensitive).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Fixed => "Fixed",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
        }
    }

    /// The lowercased section key used in the changelog structure.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Fixed => "fixed",
            Self::Changed => "changed",
            Self::Deprecated => "deprecated",
        }
    }

    /// Look up a category by its exact label spelling.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::PRIORITY.iter().copied().find(|c| c.label() == label)
    }

    /// Classify a label set by first-match priority.
    ///
    /// Returns the earliest `PRIORITY` member present in `labels`, so a
    /// merge request labeled both `Added` and `Fixed` always classifies
    /// as `Added`.
    pub fn classify<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
        Self::PRIORITY
            .iter()
            .copied()
            .find(|c| labels.iter().any(|l| l.as_ref() == c.label()))
    }
}

/// Metadata block of one release section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
    /// Version string, e.g. "1.2.3"
    pub version: String,
    /// Calendar date the release merge request was merged
    pub release_date: NaiveDate,
    /// Web URL of the release merge request
    pub url: Option<String>,
}

/// One version section of the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Release metadata
    pub metadata: ReleaseMetadata,
    /// Entries grouped by category; categories present only when non-empty
    pub categories: BTreeMap<Category, Vec<String>>,
}

impl Release {
    /// Create a release with no entries
    pub fn new(metadata: ReleaseMetadata) -> Self {
        Self {
            metadata,
            categories: BTreeMap::new(),
        }
    }

    /// Append an entry to a category, preserving insertion order
    pub fn add_entry(&mut self, category: Category, entry: impl Into<String>) {
        self.categories.entry(category).or_default().push(entry.into());
    }

    /// Total entry count across all categories
    pub fn entry_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Check if the release has no entries
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }
}

/// The whole changelog: release sections keyed by version string.
///
/// The version string is the unique key; section order follows the
/// underlying collection (existing positions are preserved on overwrite,
/// new versions append).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    releases: Vec<Release>,
}

impl Changelog {
    /// Create an empty changelog
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases in section order
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Look up a release by version
    pub fn get(&self, version: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.metadata.version == version)
    }

    /// Insert a release, fully replacing any existing section under the
    /// same version (position preserved); new versions append.
    pub fn upsert(&mut self, release: Release) {
        match self
            .releases
            .iter_mut()
            .find(|r| r.metadata.version == release.metadata.version)
        {
            Some(existing) => *existing = release,
            None => self.releases.push(release),
        }
    }

    /// Number of release sections
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Check if the changelog has no releases
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn metadata(version: &str) -> ReleaseMetadata {
        ReleaseMetadata {
            version: version.to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            url: None,
        }
    }

    #[test]
    fn test_classify_first_match_wins() {
        let labels = vec!["Fixed".to_string(), "Added".to_string()];
        assert_eq!(Category::classify(&labels), Some(Category::Added));
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        let labels = vec!["added".to_string(), "FIXED".to_string()];
        assert_eq!(Category::classify(&labels), None);
    }

    #[test]
    fn test_classify_no_category_label() {
        let labels = vec!["Release".to_string(), "backend".to_string()];
        assert_eq!(Category::classify(&labels), None);
    }

    #[test]
    fn test_upsert_replaces_whole_section_in_place() {
        let mut changelog = Changelog::new();

        let mut first = Release::new(metadata("1.0.0"));
        first.add_entry(Category::Added, "old entry");
        changelog.upsert(first);

        let mut second = Release::new(metadata("2.0.0"));
        second.add_entry(Category::Fixed, "a fix");
        changelog.upsert(second);

        let mut replacement = Release::new(metadata("1.0.0"));
        replacement.add_entry(Category::Changed, "new entry");
        changelog.upsert(replacement.clone());

        assert_eq!(changelog.len(), 2);
        // Position preserved, content fully overwritten
        assert_eq!(changelog.releases()[0], replacement);
        assert!(changelog.get("1.0.0").unwrap().categories.get(&Category::Added).is_none());
    }

    #[test]
    fn test_category_order_is_fixed() {
        let mut release = Release::new(metadata("1.0.0"));
        release.add_entry(Category::Deprecated, "d");
        release.add_entry(Category::Added, "a");
        release.add_entry(Category::Changed, "c");

        let order: Vec<Category> = release.categories.keys().copied().collect();
        assert_eq!(order, vec![Category::Added, Category::Changed, Category::Deprecated]);
    }
}
