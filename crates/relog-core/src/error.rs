//! Pipeline error types

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors that abort a changelog generation run
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No merged merge request on the target branch carries the release label
    #[error("no merged merge requests with the Release label found")]
    NoReleasesFound,

    /// GitLab API errors
    #[error(transparent)]
    GitLab(#[from] relog_gitlab::GitLabError),

    /// Changelog parse/IO errors
    #[error(transparent)]
    Changelog(#[from] relog_changelog::ChangelogError),
}
