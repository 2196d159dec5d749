use std::sync::Arc;

use async_trait::async_trait;
use social_http::path_segment;

use super::error::Result;
use super::graph::GraphClient;
use super::types::Reference;

/// Friends and friend lists of the current user.
#[async_trait]
pub trait FriendOperations: Send + Sync {
    async fn get_friend_lists(&self) -> Result<Vec<Reference>>;

    async fn get_friend_list(&self, friend_list_id: &str) -> Result<Reference>;

    async fn get_friend_list_members(&self, friend_list_id: &str) -> Result<Vec<Reference>>;

    /// Returns the new list's id.
    async fn create_friend_list(&self, name: &str) -> Result<String>;

    async fn delete_friend_list(&self, friend_list_id: &str) -> Result<()>;

    async fn add_to_friend_list(&self, friend_list_id: &str, friend_id: &str) -> Result<()>;

    async fn remove_from_friend_list(&self, friend_list_id: &str, friend_id: &str) -> Result<()>;

    async fn get_friends(&self) -> Result<Vec<Reference>>;

    async fn get_friend_ids(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct FriendTemplate {
    graph: Arc<GraphClient>,
}

impl FriendTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl FriendOperations for FriendTemplate {
    async fn get_friend_lists(&self) -> Result<Vec<Reference>> {
        self.graph
            .fetch_connections("me", "friendlists", Vec::new())
            .await
    }

    async fn get_friend_list(&self, friend_list_id: &str) -> Result<Reference> {
        self.graph.fetch_object(friend_list_id, Vec::new()).await
    }

    async fn get_friend_list_members(&self, friend_list_id: &str) -> Result<Vec<Reference>> {
        self.graph
            .fetch_connections(friend_list_id, "members", Vec::new())
            .await
    }

    async fn create_friend_list(&self, name: &str) -> Result<String> {
        self.graph
            .publish("me", "friendlists", vec![("name", name.into())])
            .await
    }

    async fn delete_friend_list(&self, friend_list_id: &str) -> Result<()> {
        self.graph.delete(friend_list_id).await
    }

    async fn add_to_friend_list(&self, friend_list_id: &str, friend_id: &str) -> Result<()> {
        self.graph
            .post(friend_list_id, &member_connection(friend_id), Vec::new())
            .await
    }

    async fn remove_from_friend_list(&self, friend_list_id: &str, friend_id: &str) -> Result<()> {
        self.graph
            .delete_connection(friend_list_id, &member_connection(friend_id))
            .await
    }

    async fn get_friends(&self) -> Result<Vec<Reference>> {
        self.graph
            .fetch_connections("me", "friends", Vec::new())
            .await
    }

    async fn get_friend_ids(&self) -> Result<Vec<String>> {
        let friends: Vec<Reference> = self
            .graph
            .fetch_connections("me", "friends", vec![("fields", "id".into())])
            .await?;
        Ok(friends.into_iter().map(|f| f.id).collect())
    }
}

fn member_connection(friend_id: &str) -> String {
    format!("members/{}", path_segment(friend_id))
}
