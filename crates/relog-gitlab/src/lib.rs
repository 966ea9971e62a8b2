//! Relog GitLab - GitLab REST v4 API client
//!
//! Read-only access to the merge-request and commit endpoints the
//! changelog pipeline needs, behind the [`GitLabApi`] trait so the
//! pipeline can run against an in-memory fake in tests.

pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::GitLabClient;
pub use credentials::Credentials;
pub use error::{GitLabError, Result};
pub use types::{Author, Commit, MergeRequest, Project};

/// Read-only GitLab API surface used by the changelog pipeline
#[async_trait::async_trait]
pub trait GitLabApi: Send + Sync {
    /// Look up a project by numeric id
    async fn get_project(&self, id: u64) -> Result<Project>;

    /// List merged merge requests targeting `target_branch`
    async fn list_merged_merge_requests(
        &self,
        project_id: u64,
        target_branch: &str,
    ) -> Result<Vec<MergeRequest>>;

    /// Fetch a single merge request by iid
    async fn get_merge_request(&self, project_id: u64, iid: u64) -> Result<MergeRequest>;

    /// List the commits belonging to a merge request
    async fn list_commits(&self, project_id: u64, merge_request_iid: u64) -> Result<Vec<Commit>>;
}
