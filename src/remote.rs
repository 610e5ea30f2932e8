use crate::error::{PulseError, Result};
use crate::model::CommitPage;

pub const DEFAULT_HOST: &str = "https://github.com/api/v2/json";

/// Thin client for the remote commit-list API.
pub struct RemoteClient {
    client: reqwest::Client,
    host: String,
}

impl RemoteClient {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetches one page of the commit list for `repo_ref`. Pages are
    /// 1-indexed and ordered most-recent first by the remote.
    pub async fn fetch_page(&self, repo_ref: &str, page: u32) -> Result<CommitPage> {
        let url = format!("{}/commits/list/{}", self.host, repo_ref);
        tracing::trace!(%url, page, "requesting commit page");

        let response = self
            .client
            .get(&url)
            .query(&[("page", page)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PulseError::RemoteStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}
