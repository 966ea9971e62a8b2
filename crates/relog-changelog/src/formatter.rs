//! Keep-a-changelog Markdown renderer

use tracing::debug;

use crate::types::Changelog;

const HEADER: &str = "\
# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/).
";

/// Render a changelog to Markdown.
///
/// Version sections appear in collection order, categories in the fixed
/// priority order, and link references (one per release with a source
/// URL) at the bottom. The output parses back to an equal `Changelog`.
pub fn render(changelog: &Changelog) -> String {
    let mut output = String::from(HEADER);

    for release in changelog.releases() {
        output.push('\n');
        output.push_str(&format!(
            "## [{}] - {}\n",
            release.metadata.version,
            release.metadata.release_date.format("%Y-%m-%d")
        ));

        for (category, entries) in &release.categories {
            if entries.is_empty() {
                continue;
            }
            output.push_str(&format!("\n### {}\n\n", category.label()));
            for entry in entries {
                output.push_str(&format!("- {}\n", entry));
            }
        }
    }

    let mut references = String::new();
    for release in changelog.releases() {
        if let Some(url) = &release.metadata.url {
            references.push_str(&format!("[{}]: {}\n", release.metadata.version, url));
        }
    }
    if !references.is_empty() {
        output.push('\n');
        output.push_str(&references);
    }

    debug!(output_len = output.len(), "changelog rendered");
    output
}
