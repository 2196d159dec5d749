use std::sync::Arc;

use async_trait::async_trait;

use super::TwitterClient;
use super::error::Result;
use super::json::ScreenNameJson;

/// Friends (accounts a user follows) and followers, by screen name.
#[async_trait]
pub trait FriendOperations: Send + Sync {
    async fn get_friends(&self, screen_name: &str) -> Result<Vec<String>>;

    async fn get_followers(&self, screen_name: &str) -> Result<Vec<String>>;

    /// Returns the screen name Twitter reports as followed.
    async fn follow(&self, screen_name: &str) -> Result<String>;

    /// Returns the screen name Twitter reports as unfollowed.
    async fn unfollow(&self, screen_name: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct FriendTemplate {
    client: Arc<TwitterClient>,
}

impl FriendTemplate {
    pub(crate) fn new(client: Arc<TwitterClient>) -> Self {
        Self { client }
    }

    async fn screen_names(&self, path: &str, screen_name: &str) -> Result<Vec<String>> {
        let users: Vec<ScreenNameJson> = self
            .client
            .get(path, vec![("screen_name", screen_name.into())])
            .await?;
        Ok(users.into_iter().map(|u| u.screen_name).collect())
    }

    async fn friendship(&self, path: &str, screen_name: &str) -> Result<String> {
        self.client.require_authorization()?;
        let user: ScreenNameJson = self
            .client
            .post(path, vec![("screen_name", screen_name.into())], Vec::new())
            .await?;
        tracing::debug!(path, screen_name = %user.screen_name, "twitter.friendship.changed");
        Ok(user.screen_name)
    }
}

#[async_trait]
impl FriendOperations for FriendTemplate {
    async fn get_friends(&self, screen_name: &str) -> Result<Vec<String>> {
        self.screen_names("statuses/friends.json", screen_name).await
    }

    async fn get_followers(&self, screen_name: &str) -> Result<Vec<String>> {
        self.screen_names("statuses/followers.json", screen_name).await
    }

    async fn follow(&self, screen_name: &str) -> Result<String> {
        self.friendship("friendships/create.json", screen_name).await
    }

    async fn unfollow(&self, screen_name: &str) -> Result<String> {
        self.friendship("friendships/destroy.json", screen_name).await
    }
}
