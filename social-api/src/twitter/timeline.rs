use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::error::Result;
use super::json::TimelineTweetJson;
use super::types::{StatusDetails, Tweet};
use super::{Params, TwitterClient};

/// Timelines, mentions and status updates.
#[async_trait]
pub trait TimelineOperations: Send + Sync {
    async fn get_public_timeline(&self) -> Result<Vec<Tweet>>;

    async fn get_home_timeline(&self) -> Result<Vec<Tweet>>;

    async fn get_friends_timeline(&self) -> Result<Vec<Tweet>>;

    /// The authenticated user's own tweets.
    async fn get_user_timeline(&self) -> Result<Vec<Tweet>>;

    async fn get_user_timeline_for_screen_name(&self, screen_name: &str) -> Result<Vec<Tweet>>;

    async fn get_user_timeline_for_user_id(&self, user_id: u64) -> Result<Vec<Tweet>>;

    async fn get_mentions(&self) -> Result<Vec<Tweet>>;

    async fn update_status(&self, message: &str) -> Result<()>;

    async fn update_status_with_details(&self, message: &str, details: &StatusDetails)
    -> Result<()>;

    async fn retweet(&self, tweet_id: u64) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct TimelineTemplate {
    client: Arc<TwitterClient>,
}

impl TimelineTemplate {
    pub(crate) fn new(client: Arc<TwitterClient>) -> Self {
        Self { client }
    }

    async fn timeline(&self, path: &str, query: Params<'_>) -> Result<Vec<Tweet>> {
        let items: Vec<TimelineTweetJson> = self.client.get(path, query).await?;
        Ok(items.into_iter().map(Tweet::from).collect())
    }
}

#[async_trait]
impl TimelineOperations for TimelineTemplate {
    async fn get_public_timeline(&self) -> Result<Vec<Tweet>> {
        self.timeline("statuses/public_timeline.json", Vec::new()).await
    }

    async fn get_home_timeline(&self) -> Result<Vec<Tweet>> {
        self.client.require_authorization()?;
        self.timeline("statuses/home_timeline.json", Vec::new()).await
    }

    async fn get_friends_timeline(&self) -> Result<Vec<Tweet>> {
        self.client.require_authorization()?;
        self.timeline("statuses/friends_timeline.json", Vec::new()).await
    }

    async fn get_user_timeline(&self) -> Result<Vec<Tweet>> {
        self.client.require_authorization()?;
        self.timeline("statuses/user_timeline.json", Vec::new()).await
    }

    async fn get_user_timeline_for_screen_name(&self, screen_name: &str) -> Result<Vec<Tweet>> {
        self.timeline(
            "statuses/user_timeline.json",
            vec![("screen_name", screen_name.into())],
        )
        .await
    }

    async fn get_user_timeline_for_user_id(&self, user_id: u64) -> Result<Vec<Tweet>> {
        self.timeline(
            "statuses/user_timeline.json",
            vec![("user_id", user_id.to_string().into())],
        )
        .await
    }

    async fn get_mentions(&self) -> Result<Vec<Tweet>> {
        self.client.require_authorization()?;
        self.timeline("statuses/mentions.json", Vec::new()).await
    }

    async fn update_status(&self, message: &str) -> Result<()> {
        self.update_status_with_details(message, &StatusDetails::default())
            .await
    }

    async fn update_status_with_details(
        &self,
        message: &str,
        details: &StatusDetails,
    ) -> Result<()> {
        self.client.require_authorization()?;
        let mut form: Params<'_> = vec![("status", message.into())];
        form.extend(details.to_parameters());
        let _: Value = self
            .client
            .post("statuses/update.json", Vec::new(), form)
            .await?;
        Ok(())
    }

    async fn retweet(&self, tweet_id: u64) -> Result<()> {
        self.client.require_authorization()?;
        let path = format!("statuses/retweet/{tweet_id}.json");
        let _: Value = self.client.post(&path, Vec::new(), Vec::new()).await?;
        Ok(())
    }
}
