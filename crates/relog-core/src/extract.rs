//! Entry extraction
//!
//! Walks the commits of one release merge request, resolves the change
//! merge requests they reference, classifies each by label, and builds
//! the release's changelog section.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

use relog_changelog::{Category, Release, ReleaseMetadata};
use relog_gitlab::{GitLabApi, MergeRequest};

use crate::discover::ReleaseMergeRequest;
use crate::error::Result;

/// Regex for the merge-commit trailer GitLab appends on merge, e.g.
/// "See merge request group/proj!42"
static MERGE_REQUEST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"See merge request.*!(\d+)$").expect("Invalid regex"));

/// Extract the referenced merge request iid from a commit message.
///
/// Only the last line of the message is considered; commits whose last
/// line does not end in the merge-request trailer yield `None`.
pub fn referenced_merge_request(message: &str) -> Option<u64> {
    let last_line = message.trim_end().lines().last()?;
    let caps = MERGE_REQUEST_REGEX.captures(last_line)?;
    caps[1].parse().ok()
}

/// Render one changelog entry for a change merge request.
pub fn format_entry(merge_request: &MergeRequest) -> String {
    format!(
        "[{}]({}) {} (@{})",
        merge_request.iid,
        merge_request.web_url,
        merge_request.title,
        merge_request.author.username
    )
}

/// Build the changelog section for one release merge request.
///
/// Commits are scanned in the order the API returns them; entries keep
/// that order within their category. Referenced merge requests without a
/// recognized category label are skipped with a warning. Duplicate
/// references produce duplicate entries.
#[instrument(skip(api, release), fields(version = %release.version, iid = release.merge_request.iid))]
pub async fn extract_release(
    api: &dyn GitLabApi,
    project_id: u64,
    release: &ReleaseMergeRequest,
) -> Result<Release> {
    let mut section = Release::new(ReleaseMetadata {
        version: release.version.clone(),
        release_date: release.merged_at.date_naive(),
        url: Some(release.merge_request.web_url.clone()),
    });

    let commits = api
        .list_commits(project_id, release.merge_request.iid)
        .await?;
    debug!(commit_count = commits.len(), "scanning release commits");

    for commit in &commits {
        let Some(iid) = referenced_merge_request(&commit.message) else {
            continue;
        };

        let merge_request = api.get_merge_request(project_id, iid).await?;
        match Category::classify(&merge_request.labels) {
            Some(category) => {
                section.add_entry(category, format_entry(&merge_request));
            }
            None => {
                warn!(
                    iid = merge_request.iid,
                    title = %merge_request.title,
                    "merge request has no changelog label, skipping"
                );
            }
        }
    }

    debug!(entry_count = section.entry_count(), "release section built");
    Ok(section)
}
