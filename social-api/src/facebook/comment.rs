use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::graph::GraphClient;
use super::types::Comment;

#[async_trait]
pub trait CommentOperations: Send + Sync {
    async fn get_comments(&self, object_id: &str) -> Result<Vec<Comment>>;

    async fn get_comment(&self, comment_id: &str) -> Result<Comment>;

    /// Returns the new comment's id.
    async fn add_comment(&self, object_id: &str, message: &str) -> Result<String>;

    async fn delete_comment(&self, comment_id: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct CommentTemplate {
    graph: Arc<GraphClient>,
}

impl CommentTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl CommentOperations for CommentTemplate {
    async fn get_comments(&self, object_id: &str) -> Result<Vec<Comment>> {
        self.graph
            .fetch_connections(object_id, "comments", Vec::new())
            .await
    }

    async fn get_comment(&self, comment_id: &str) -> Result<Comment> {
        self.graph.fetch_object(comment_id, Vec::new()).await
    }

    async fn add_comment(&self, object_id: &str, message: &str) -> Result<String> {
        self.graph
            .publish(object_id, "comments", vec![("message", message.into())])
            .await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.graph.delete(comment_id).await
    }
}
