use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use atelier_common::{AtelierError, Comment, Designer, Page, Project, Task};
use atelier_config::ApiConfig;

use crate::query;
use crate::source::ResourceSource;

#[derive(Clone)]
pub struct ResourceClient {
    client: Client,
    config: ApiConfig,
}

/// Failure of a single GET. Neither variant is retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP {status}: {body}")]
    HttpError { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

impl From<ClientError> for AtelierError {
    fn from(err: ClientError) -> Self {
        AtelierError::Network(err.to_string())
    }
}

impl ResourceClient {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// For testing: point the client at a specific base URL (e.g., wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.config.url_for(endpoint);
        tracing::debug!(url = %url, query = %query::render(params), "GET");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, %status, "request rejected");
            return Err(ClientError::HttpError { status, body });
        }

        response.json::<T>().await.map_err(ClientError::RequestError)
    }
}

#[async_trait]
impl ResourceSource for ResourceClient {
    async fn fetch_designers(
        &self,
        page: u32,
        ordering: &str,
    ) -> Result<Page<Designer>, ClientError> {
        self.get_json(
            &self.config.designer_endpoint,
            &query::designer_page_query(page, ordering),
        )
        .await
    }

    async fn fetch_top_designers(&self, limit: u32) -> Result<Vec<Designer>, ClientError> {
        let page: Page<Designer> = self
            .get_json(&self.config.designer_endpoint, &query::limit_query(limit))
            .await?;
        Ok(page.results)
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.get_json(&self.config.issue_endpoint, &[]).await
    }

    async fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError> {
        self.get_json(
            &self.config.comment_endpoint,
            &query::latest_comments_query(limit),
        )
        .await
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.get_json(&self.config.project_endpoint, &[]).await
    }
}
