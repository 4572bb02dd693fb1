use async_trait::async_trait;

use atelier_common::{Comment, Designer, Page, Project, Task};

use crate::client::ClientError;

/// Read access to the dashboard backend.
///
/// Implemented by [`crate::ResourceClient`]; loaders depend on this trait so
/// they can be exercised against in-memory fixtures.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// One server-sorted page of designers with their embedded issues.
    async fn fetch_designers(&self, page: u32, ordering: &str)
        -> Result<Page<Designer>, ClientError>;

    async fn fetch_top_designers(&self, limit: u32) -> Result<Vec<Designer>, ClientError>;

    /// The full, unpaginated task list.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ClientError>;

    /// Newest comments first.
    async fn fetch_comments(&self, limit: u32) -> Result<Vec<Comment>, ClientError>;

    async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError>;
}
