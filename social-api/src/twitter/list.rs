use std::sync::Arc;

use async_trait::async_trait;
use social_http::path_segment;

use super::TwitterClient;
use super::error::Result;
use super::json::{ListsJson, TimelineTweetJson, UserListJson, UsersJson};
use super::types::{Tweet, TwitterProfile, UserList};

/// Read access to a user's lists.
#[async_trait]
pub trait ListOperations: Send + Sync {
    async fn get_lists(&self, screen_name: &str) -> Result<Vec<UserList>>;

    async fn get_list(&self, screen_name: &str, list_id: u64) -> Result<UserList>;

    async fn get_list_statuses(&self, screen_name: &str, list_id: u64) -> Result<Vec<Tweet>>;

    async fn get_list_members(&self, screen_name: &str, list_id: u64)
    -> Result<Vec<TwitterProfile>>;
}

#[derive(Debug, Clone)]
pub struct ListTemplate {
    client: Arc<TwitterClient>,
}

impl ListTemplate {
    pub(crate) fn new(client: Arc<TwitterClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListOperations for ListTemplate {
    async fn get_lists(&self, screen_name: &str) -> Result<Vec<UserList>> {
        let path = format!("{}/lists.json", path_segment(screen_name));
        let lists: ListsJson = self.client.get(&path, Vec::new()).await?;
        Ok(lists.lists.into_iter().map(UserList::from).collect())
    }

    async fn get_list(&self, screen_name: &str, list_id: u64) -> Result<UserList> {
        let path = format!("{}/lists/{list_id}.json", path_segment(screen_name));
        let list: UserListJson = self.client.get(&path, Vec::new()).await?;
        Ok(list.into())
    }

    async fn get_list_statuses(&self, screen_name: &str, list_id: u64) -> Result<Vec<Tweet>> {
        let path = format!("{}/lists/{list_id}/statuses.json", path_segment(screen_name));
        let items: Vec<TimelineTweetJson> = self.client.get(&path, Vec::new()).await?;
        Ok(items.into_iter().map(Tweet::from).collect())
    }

    async fn get_list_members(
        &self,
        screen_name: &str,
        list_id: u64,
    ) -> Result<Vec<TwitterProfile>> {
        let path = format!("{}/{list_id}/members.json", path_segment(screen_name));
        let members: UsersJson = self.client.get(&path, Vec::new()).await?;
        Ok(members.users.into_iter().map(TwitterProfile::from).collect())
    }
}
