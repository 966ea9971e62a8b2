//! GitLab credential loading
//!
//! Credentials come from the environment: `GITLAB_URL` and
//! `GITLAB_PRIVATE_TOKEN`. With `DEV_MODE=true` a `.env` file in the
//! working directory is loaded first; otherwise `~/.gitlab_changelog_generator`
//! is consulted.

use tracing::debug;

use crate::error::{GitLabError, Result};

const ENV_URL: &str = "GITLAB_URL";
const ENV_TOKEN: &str = "GITLAB_PRIVATE_TOKEN";
const DOTFILE_NAME: &str = ".gitlab_changelog_generator";

/// GitLab connection credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Base URL of the GitLab instance, e.g. `https://gitlab.example.com`
    pub base_url: String,
    /// Private access token with read access to the project
    pub token: String,
}

impl Credentials {
    /// Load credentials from the environment, consulting the dotfile
    /// appropriate for the current mode.
    pub fn load() -> Result<Self> {
        if std::env::var("DEV_MODE").as_deref() == Ok("true") {
            if dotenvy::dotenv().is_ok() {
                debug!("loaded .env from working directory (DEV_MODE)");
            }
        } else if let Some(home) = dirs::home_dir() {
            let dotfile = home.join(DOTFILE_NAME);
            if dotenvy::from_path(&dotfile).is_ok() {
                debug!(path = %dotfile.display(), "loaded credentials dotfile");
            }
        }

        Self::from_env()
    }

    /// Read credentials from already-set environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(ENV_URL).map_err(|_| GitLabError::MissingCredential(ENV_URL))?;
        let token =
            std::env::var(ENV_TOKEN).map_err(|_| GitLabError::MissingCredential(ENV_TOKEN))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}
