//! Keep-a-changelog Markdown parser
//!
//! Parses the strict four-category subset of the format: version headings
//! `## [x.y.z] - YYYY-MM-DD`, category headings `### <Category>`, bulleted
//! entries, and trailing link references `[x.y.z]: <url>`.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::error::{ChangelogError, Result};
use crate::types::{Category, Changelog, Release, ReleaseMetadata};

/// Regex for version headings, e.g. `## [1.2.0] - 2024-01-15`
static VERSION_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## \[(?P<version>[^\]]+)\] - (?P<date>.+?)\s*$").expect("Invalid regex")
});

/// Regex for link reference lines, e.g. `[1.2.0]: https://gl/mr/5`
static LINK_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<version>[^\]]+)\]:\s*(?P<url>\S+)\s*$").expect("Invalid regex")
});

/// Parse changelog Markdown into the structured form.
///
/// Content before the first version heading (title, prose) is ignored,
/// except `## ` headings that are not dated version headings — those are
/// errors everywhere, since a later save would drop them. Inside the
/// section body, anything that is not a heading, a bullet, a link
/// reference, or a blank line is an error.
pub fn parse(text: &str) -> Result<Changelog> {
    let mut changelog = Changelog::new();
    let mut current: Option<Release> = None;
    let mut current_category: Option<Category> = None;
    let mut link_refs: HashMap<String, String> = HashMap::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if line.trim().is_empty() {
            continue;
        }

        if let Some(caps) = VERSION_HEADING_REGEX.captures(line) {
            if let Some(release) = current.take() {
                changelog.upsert(release);
            }
            let version = caps["version"].to_string();
            let date_str = &caps["date"];
            let release_date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
                ChangelogError::InvalidDate {
                    line: line_no,
                    value: date_str.to_string(),
                }
            })?;
            current = Some(Release::new(ReleaseMetadata {
                version,
                release_date,
                url: None,
            }));
            current_category = None;
            continue;
        }

        // Any other `## ` heading (undated, or an Unreleased section) is
        // outside the supported schema; dropping it would lose content on
        // the next save.
        if line.starts_with("## ") {
            return Err(ChangelogError::InvalidVersionHeading {
                line: line_no,
                content: line.to_string(),
            });
        }

        // Preamble before the first version heading is free-form
        if current.is_none() && !line.starts_with("###") && !line.starts_with("- ") {
            continue;
        }

        if let Some(name) = line.strip_prefix("### ") {
            let name = name.trim();
            let category =
                Category::from_label(name).ok_or_else(|| ChangelogError::UnknownCategory {
                    line: line_no,
                    name: name.to_string(),
                })?;
            current_category = Some(category);
            continue;
        }

        if let Some(entry) = line.strip_prefix("- ") {
            let category = current_category.ok_or(ChangelogError::OrphanEntry { line: line_no })?;
            match current.as_mut() {
                Some(release) => release.add_entry(category, entry.trim_end()),
                None => return Err(ChangelogError::OrphanEntry { line: line_no }),
            }
            continue;
        }

        if let Some(caps) = LINK_REFERENCE_REGEX.captures(line) {
            link_refs.insert(caps["version"].to_string(), caps["url"].to_string());
            continue;
        }

        return Err(ChangelogError::UnexpectedLine {
            line: line_no,
            content: line.to_string(),
        });
    }

    if let Some(release) = current.take() {
        changelog.upsert(release);
    }

    // Attach source URLs from the link references; references that name
    // no parsed version are dropped.
    let mut resolved = Changelog::new();
    for release in changelog.releases() {
        let mut release = release.clone();
        release.metadata.url = link_refs.remove(&release.metadata.version);
        resolved.upsert(release);
    }

    debug!(releases = resolved.len(), "changelog parsed");
    Ok(resolved)
}
