use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::graph::GraphClient;
use super::types::{FacebookProfile, Group, GroupMemberReference, ImageType};

const PROFILE_FIELDS: &str = "id,username,name,first_name,last_name,gender,locale,link,email";

#[async_trait]
pub trait GroupOperations: Send + Sync {
    async fn get_group(&self, group_id: &str) -> Result<Group>;

    async fn get_group_image(&self, group_id: &str) -> Result<Vec<u8>>;

    async fn get_group_image_of_type(&self, group_id: &str, image_type: ImageType)
    -> Result<Vec<u8>>;

    async fn get_members(&self, group_id: &str) -> Result<Vec<GroupMemberReference>>;

    /// Members with their full profiles, fetched in one request.
    async fn get_member_profiles(&self, group_id: &str) -> Result<Vec<FacebookProfile>>;

    async fn search(&self, query: &str) -> Result<Vec<Group>>;
}

#[derive(Debug, Clone)]
pub struct GroupTemplate {
    graph: Arc<GraphClient>,
}

impl GroupTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl GroupOperations for GroupTemplate {
    async fn get_group(&self, group_id: &str) -> Result<Group> {
        self.graph.fetch_object(group_id, Vec::new()).await
    }

    async fn get_group_image(&self, group_id: &str) -> Result<Vec<u8>> {
        self.get_group_image_of_type(group_id, ImageType::Normal)
            .await
    }

    async fn get_group_image_of_type(
        &self,
        group_id: &str,
        image_type: ImageType,
    ) -> Result<Vec<u8>> {
        self.graph.fetch_image(group_id, "picture", image_type).await
    }

    async fn get_members(&self, group_id: &str) -> Result<Vec<GroupMemberReference>> {
        self.graph
            .fetch_connections(group_id, "members", Vec::new())
            .await
    }

    async fn get_member_profiles(&self, group_id: &str) -> Result<Vec<FacebookProfile>> {
        self.graph
            .fetch_connections(group_id, "members", vec![("fields", PROFILE_FIELDS.into())])
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Group>> {
        self.graph.search(query, "group").await
    }
}
