//! Changelog generation pipeline
//!
//! Ties discovery, extraction, and merging together: list merged merge
//! requests on the target branch, discover releases, build one changelog
//! section per release, and overwrite the matching sections of the
//! existing changelog.

use tracing::{info, instrument};

use relog_changelog::Changelog;
use relog_gitlab::{GitLabApi, Project};

use crate::discover::discover_releases;
use crate::error::Result;
use crate::extract::extract_release;

/// Outcome of a generation run, for reporting
#[derive(Debug, Clone)]
pub struct ProcessedRelease {
    /// Version string of the release
    pub version: String,
    /// Number of entries extracted for it
    pub entry_count: usize,
}

/// Summary of one generation run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Releases processed, in output order
    pub releases: Vec<ProcessedRelease>,
}

/// Changelog generation pipeline over a GitLab API handle
pub struct ChangelogGenerator<'a> {
    api: &'a dyn GitLabApi,
}

impl<'a> ChangelogGenerator<'a> {
    /// Create a generator over an API handle
    pub fn new(api: &'a dyn GitLabApi) -> Self {
        Self { api }
    }

    /// Run the pipeline for a project, merging each discovered release
    /// into `changelog`.
    ///
    /// Each release's section is a full overwrite: reprocessing a version
    /// replaces whatever the changelog previously held under it.
    #[instrument(skip(self, project, changelog), fields(project = %project.name, target_branch))]
    pub async fn run(
        &self,
        project: &Project,
        target_branch: &str,
        changelog: &mut Changelog,
    ) -> Result<RunSummary> {
        let merge_requests = self
            .api
            .list_merged_merge_requests(project.id, target_branch)
            .await?;
        let releases = discover_releases(merge_requests)?;
        info!(release_count = releases.len(), "releases discovered");

        let mut summary = RunSummary::default();
        for release in &releases {
            let section = extract_release(self.api, project.id, release).await?;
            summary.releases.push(ProcessedRelease {
                version: section.metadata.version.clone(),
                entry_count: section.entry_count(),
            });
            changelog.upsert(section);
        }

        Ok(summary)
    }
}
