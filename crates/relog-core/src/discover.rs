//! Release discovery
//!
//! Filters merged merge requests to those labeled as releases and
//! extracts a version from each title.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::warn;

use relog_gitlab::MergeRequest;

use crate::error::{GeneratorError, Result};

/// Label marking a merge request as a release
pub const RELEASE_LABEL: &str = "Release";

/// Regex for the trailing version token in a release title, e.g.
/// "Release v1.2.0"
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v(\d+\.\d+\.\d+)$").expect("Invalid regex"));

/// A release merge request with its extracted version and merge timestamp
#[derive(Debug, Clone)]
pub struct ReleaseMergeRequest {
    /// Version string extracted from the title, without the `v` prefix
    pub version: String,
    /// When the release was merged
    pub merged_at: DateTime<Utc>,
    /// The underlying merge request
    pub merge_request: MergeRequest,
}

/// Extract the trailing `vX.Y.Z` version from a release title.
pub fn extract_version(title: &str) -> Option<String> {
    VERSION_REGEX
        .captures(title.trim_end())
        .map(|caps| caps[1].to_string())
}

/// Discover releases among merged merge requests.
///
/// Fails with [`GeneratorError::NoReleasesFound`] when no merge request
/// carries the release label. Release-labeled merge requests whose title
/// has no trailing version, or which lack a merge timestamp, are skipped
/// with a warning. The survivors are sorted ascending by merge timestamp
/// so output order does not depend on API response order.
pub fn discover_releases(merge_requests: Vec<MergeRequest>) -> Result<Vec<ReleaseMergeRequest>> {
    let labeled: Vec<MergeRequest> = merge_requests
        .into_iter()
        .filter(|mr| mr.labels.iter().any(|l| l == RELEASE_LABEL))
        .collect();

    if labeled.is_empty() {
        return Err(GeneratorError::NoReleasesFound);
    }

    let mut releases = Vec::with_capacity(labeled.len());
    for merge_request in labeled {
        let Some(version) = extract_version(&merge_request.title) else {
            warn!(
                iid = merge_request.iid,
                title = %merge_request.title,
                "could not extract version from release merge request, skipping"
            );
            continue;
        };

        let Some(merged_at) = merge_request.merged_at else {
            warn!(
                iid = merge_request.iid,
                title = %merge_request.title,
                "release merge request has no merge timestamp, skipping"
            );
            continue;
        };

        releases.push(ReleaseMergeRequest {
            version,
            merged_at,
            merge_request,
        });
    }

    releases.sort_by_key(|r| r.merged_at);
    Ok(releases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use relog_gitlab::Author;

    fn merge_request(iid: u64, title: &str, labels: &[&str], merged_at: Option<&str>) -> MergeRequest {
        MergeRequest {
            iid,
            title: title.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            author: Author {
                username: "alice".to_string(),
            },
            web_url: format!("https://gl/mr/{}", iid),
            merged_at: merged_at.map(|s| s.parse().unwrap()),
        }
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("Release v1.2.0"), Some("1.2.0".to_string()));
        assert_eq!(extract_version("v0.10.3"), Some("0.10.3".to_string()));
        assert_eq!(extract_version("Release v1.2"), None);
        assert_eq!(extract_version("Release v1.2.0-rc1"), None);
        assert_eq!(extract_version("Release 1.2.0"), None);
        assert_eq!(extract_version("v1.2.0 hotfix"), None);
    }

    #[test]
    fn test_no_release_label_is_fatal() {
        let merge_requests = vec![
            merge_request(1, "Add feature v1.0.0", &["Added"], Some("2024-01-01T00:00:00Z")),
            merge_request(2, "Fix bug", &["Fixed"], Some("2024-01-02T00:00:00Z")),
        ];
        assert!(matches!(
            discover_releases(merge_requests),
            Err(GeneratorError::NoReleasesFound)
        ));
    }

    #[test]
    fn test_unparseable_title_is_skipped() {
        let merge_requests = vec![
            merge_request(1, "Release candidate", &["Release"], Some("2024-01-01T00:00:00Z")),
            merge_request(2, "Release v1.0.0", &["Release"], Some("2024-01-02T00:00:00Z")),
        ];
        let releases = discover_releases(merge_requests).unwrap();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].version, "1.0.0");
    }

    #[test]
    fn test_releases_sorted_by_merge_date() {
        let merge_requests = vec![
            merge_request(5, "Release v2.0.0", &["Release"], Some("2024-03-01T00:00:00Z")),
            merge_request(3, "Release v1.0.0", &["Release"], Some("2024-01-01T00:00:00Z")),
            merge_request(4, "Release v1.1.0", &["Release"], Some("2024-02-01T00:00:00Z")),
        ];
        let releases = discover_releases(merge_requests).unwrap();
        let versions: Vec<&str> = releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["1.0.0", "1.1.0", "2.0.0"]);
        assert_eq!(
            releases[0].merged_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_merge_timestamp_is_skipped() {
        let merge_requests = vec![
            merge_request(1, "Release v1.0.0", &["Release"], None),
            merge_request(2, "Release v1.1.0", &["Release"], Some("2024-01-02T00:00:00Z")),
        ];
        let releases = discover_releases(merge_requests).unwrap();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].version, "1.1.0");
    }
}
