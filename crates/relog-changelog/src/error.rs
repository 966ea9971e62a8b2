//! Changelog error types

use thiserror::Error;

/// Result type for changelog operations
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// A line that fits nowhere in the keep-a-changelog structure
    #[error("changelog line {line}: unexpected content: {content}")]
    UnexpectedLine { line: usize, content: String },

    /// A `##` heading that is not a dated version heading
    #[error("changelog line {line}: not a dated version heading: {content}")]
    InvalidVersionHeading { line: usize, content: String },

    /// A `###` heading naming a category outside the supported set
    #[error("changelog line {line}: unknown category heading: {name}")]
    UnknownCategory { line: usize, name: String },

    /// A version heading without a parseable release date
    #[error("changelog line {line}: invalid release date: {value}")]
    InvalidDate { line: usize, value: String },

    /// A bullet entry appearing before any category heading
    #[error("changelog line {line}: entry outside of a category section")]
    OrphanEntry { line: usize },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
