//! GitLab API payload types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitLab project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Numeric project id
    pub id: u64,
    /// Project name
    pub name: String,
}

/// Merge request author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// GitLab username (without the `@`)
    pub username: String,
}

/// A merge request, as returned by the merge-request endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped merge request id (the `!N` number)
    pub iid: u64,
    /// Merge request title
    pub title: String,
    /// Label names attached to the merge request
    #[serde(default)]
    pub labels: Vec<String>,
    /// Author of the merge request
    pub author: Author,
    /// Web URL of the merge request page
    pub web_url: String,
    /// Merge timestamp; absent on unmerged merge requests
    pub merged_at: Option<DateTime<Utc>>,
}

/// A commit belonging to a merge request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Commit SHA
    pub id: String,
    /// Full commit message
    pub message: String,
}
