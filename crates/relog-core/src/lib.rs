//! Relog Core - changelog extraction and merge pipeline
//!
//! Turns a GitLab project's merged release merge requests into versioned,
//! categorized changelog sections and merges them into an existing
//! changelog structure.

pub mod discover;
pub mod error;
pub mod extract;
pub mod generator;

pub use discover::{discover_releases, ReleaseMergeRequest, RELEASE_LABEL};
pub use error::{GeneratorError, Result};
pub use generator::{ChangelogGenerator, RunSummary};
