//! GitLab REST v4 client

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::credentials::Credentials;
use crate::error::{GitLabError, Result};
use crate::types::{Commit, MergeRequest, Project};
use crate::GitLabApi;

const PER_PAGE: usize = 100;

/// GitLab API client authenticated with a private token
pub struct GitLabClient {
    credentials: Credentials,
    client: Client,
}

impl GitLabClient {
    /// Create a client from loaded credentials
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.credentials.base_url, path)
    }

    /// Perform an authenticated GET and deserialize the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.credentials.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GitLabError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// GET a paginated list endpoint, following pages until a short page.
    async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let mut query = query.to_vec();
            query.push(("per_page", PER_PAGE.to_string()));
            query.push(("page", page.to_string()));

            let batch: Vec<T> = self.get(path, &query).await?;
            let batch_len = batch.len();
            items.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[async_trait::async_trait]
impl GitLabApi for GitLabClient {
    #[instrument(skip(self))]
    async fn get_project(&self, id: u64) -> Result<Project> {
        // GitLab answers 404 both for missing projects and for projects
        // hidden by permissions; any API-level failure on lookup reads as
        // not-found. Transport errors still propagate as Http.
        match self.get(&format!("/projects/{}", id), &[]).await {
            Ok(project) => Ok(project),
            Err(GitLabError::ApiError { .. }) => Err(GitLabError::ProjectNotFound(id)),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn list_merged_merge_requests(
        &self,
        project_id: u64,
        target_branch: &str,
    ) -> Result<Vec<MergeRequest>> {
        let merge_requests = self
            .get_paged(
                &format!("/projects/{}/merge_requests", project_id),
                &[
                    ("state", "merged".to_string()),
                    ("target_branch", target_branch.to_string()),
                ],
            )
            .await?;
        debug!(count = merge_requests.len(), "merged merge requests listed");
        Ok(merge_requests)
    }

    #[instrument(skip(self))]
    async fn get_merge_request(&self, project_id: u64, iid: u64) -> Result<MergeRequest> {
        self.get(&format!("/projects/{}/merge_requests/{}", project_id, iid), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn list_commits(&self, project_id: u64, merge_request_iid: u64) -> Result<Vec<Commit>> {
        self.get_paged(
            &format!(
                "/projects/{}/merge_requests/{}/commits",
                project_id, merge_request_iid
            ),
            &[],
        )
        .await
    }
}
