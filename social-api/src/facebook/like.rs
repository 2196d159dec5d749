use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::graph::GraphClient;
use super::types::Reference;

#[async_trait]
pub trait LikeOperations: Send + Sync {
    async fn like(&self, object_id: &str) -> Result<()>;

    async fn unlike(&self, object_id: &str) -> Result<()>;

    /// Users who like the object.
    async fn get_likes(&self, object_id: &str) -> Result<Vec<Reference>>;
}

#[derive(Debug, Clone)]
pub struct LikeTemplate {
    graph: Arc<GraphClient>,
}

impl LikeTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl LikeOperations for LikeTemplate {
    async fn like(&self, object_id: &str) -> Result<()> {
        self.graph.post(object_id, "likes", Vec::new()).await
    }

    async fn unlike(&self, object_id: &str) -> Result<()> {
        self.graph.delete_connection(object_id, "likes").await
    }

    async fn get_likes(&self, object_id: &str) -> Result<Vec<Reference>> {
        self.graph
            .fetch_connections(object_id, "likes", Vec::new())
            .await
    }
}
