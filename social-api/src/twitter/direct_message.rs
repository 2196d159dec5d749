use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::error::Result;
use super::json::DirectMessageJson;
use super::types::DirectMessage;
use super::{Params, TwitterClient};

#[async_trait]
pub trait DirectMessageOperations: Send + Sync {
    async fn get_direct_messages_received(&self) -> Result<Vec<DirectMessage>>;

    async fn send_direct_message_to_screen_name(&self, screen_name: &str, text: &str)
    -> Result<()>;

    async fn send_direct_message_to_user_id(&self, user_id: u64, text: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct DirectMessageTemplate {
    client: Arc<TwitterClient>,
}

impl DirectMessageTemplate {
    pub(crate) fn new(client: Arc<TwitterClient>) -> Self {
        Self { client }
    }

    async fn send(&self, mut form: Params<'_>, text: &str) -> Result<()> {
        self.client.require_authorization()?;
        form.push(("text", text.into()));
        let _: Value = self
            .client
            .post("direct_messages/new.json", Vec::new(), form)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DirectMessageOperations for DirectMessageTemplate {
    async fn get_direct_messages_received(&self) -> Result<Vec<DirectMessage>> {
        self.client.require_authorization()?;
        let items: Vec<DirectMessageJson> = self.client.get("direct_messages.json", Vec::new()).await?;
        Ok(items.into_iter().map(DirectMessage::from).collect())
    }

    async fn send_direct_message_to_screen_name(
        &self,
        screen_name: &str,
        text: &str,
    ) -> Result<()> {
        self.send(vec![("screen_name", screen_name.into())], text)
            .await
    }

    async fn send_direct_message_to_user_id(&self, user_id: u64, text: &str) -> Result<()> {
        self.send(vec![("user_id", user_id.to_string().into())], text)
            .await
    }
}
