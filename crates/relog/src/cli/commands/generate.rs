//! Generate command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use relog_changelog::Changelog;
use relog_core::{ChangelogGenerator, RunSummary};
use relog_gitlab::{Credentials, GitLabApi, GitLabClient};

use crate::cli::output;
use crate::cli::Cli;

/// Generate or update the changelog from release merge requests
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Numeric id of the GitLab project
    pub project_id: u64,

    /// Path to the changelog file
    #[arg(short, long, default_value = "./CHANGELOG.md")]
    pub changelog: PathBuf,

    /// Target branch of the release merge requests
    #[arg(short, long, default_value = "main")]
    pub branch: String,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(project_id = self.project_id, branch = %self.branch, "executing generate command");

        let rt = tokio::runtime::Runtime::new()?;
        let outcome = rt.block_on(async {
            tokio::select! {
                result = self.run(cli) => result.map(Some),
                _ = tokio::signal::ctrl_c() => Ok(None),
            }
        })?;

        // The file is only written once the full pipeline has completed;
        // an interrupt leaves the changelog untouched and exits cleanly,
        // without output.
        let Some((changelog, summary)) = outcome else {
            debug!("interrupted, changelog not written");
            return Ok(());
        };

        for release in &summary.releases {
            if !cli.quiet {
                println!(
                    "  {} {} ({} entries)",
                    style("•").dim(),
                    style(&release.version).green().bold(),
                    release.entry_count
                );
            }
            if cli.verbose {
                if let Some(section) = changelog.get(&release.version) {
                    for (category, entries) in &section.categories {
                        for entry in entries {
                            println!("      {} {}", style(category.label()).dim(), entry);
                        }
                    }
                }
            }
        }

        relog_changelog::save(&self.changelog, &changelog)?;
        if !cli.quiet {
            output::success(&format!(
                "Changelog written to {}",
                style(self.changelog.display()).cyan()
            ));
        }

        Ok(())
    }

    /// Run the pipeline, returning the merged changelog and a run summary.
    async fn run(&self, cli: &Cli) -> anyhow::Result<(Changelog, RunSummary)> {
        let credentials = Credentials::load()?;
        let api = GitLabClient::new(credentials);

        let project = api.get_project(self.project_id).await?;
        if !cli.quiet {
            output::info(&format!(
                "Generating changelog for project {}",
                style(&project.name).bold()
            ));
        }

        let mut changelog = relog_changelog::load(&self.changelog)?;
        let generator = ChangelogGenerator::new(&api);
        let summary = generator.run(&project, &self.branch, &mut changelog).await?;

        Ok((changelog, summary))
    }
}
