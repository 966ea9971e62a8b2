//! GitLab error types

use thiserror::Error;

/// Result type for GitLab operations
pub type Result<T> = std::result::Result<T, GitLabError>;

/// GitLab-related errors
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Project lookup failed
    #[error("project {0} not found")]
    ProjectNotFound(u64),

    /// Non-success response from the API
    #[error("GitLab API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Required environment variable is missing
    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),
}
