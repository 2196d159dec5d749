use std::sync::Arc;

use async_trait::async_trait;

use super::TwitterClient;
use super::error::Result;
use super::json::{CredentialsJson, UserJson};
use super::types::TwitterProfile;

/// Profile lookups.
#[async_trait]
pub trait UserOperations: Send + Sync {
    /// Screen name of the authenticated user.
    async fn get_profile_id(&self) -> Result<String>;

    /// Profile of the authenticated user.
    async fn get_user_profile(&self) -> Result<TwitterProfile>;

    async fn get_user_profile_by_screen_name(&self, screen_name: &str) -> Result<TwitterProfile>;

    async fn get_user_profile_by_id(&self, user_id: u64) -> Result<TwitterProfile>;
}

#[derive(Debug, Clone)]
pub struct UserTemplate {
    client: Arc<TwitterClient>,
}

impl UserTemplate {
    pub(crate) fn new(client: Arc<TwitterClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserOperations for UserTemplate {
    async fn get_profile_id(&self) -> Result<String> {
        self.client.require_authorization()?;
        let creds: CredentialsJson = self
            .client
            .get("account/verify_credentials.json", Vec::new())
            .await?;
        Ok(creds.screen_name)
    }

    async fn get_user_profile(&self) -> Result<TwitterProfile> {
        let screen_name = self.get_profile_id().await?;
        self.get_user_profile_by_screen_name(&screen_name).await
    }

    async fn get_user_profile_by_screen_name(&self, screen_name: &str) -> Result<TwitterProfile> {
        let user: UserJson = self
            .client
            .get("users/show.json", vec![("screen_name", screen_name.into())])
            .await?;
        Ok(user.into())
    }

    async fn get_user_profile_by_id(&self, user_id: u64) -> Result<TwitterProfile> {
        let user: UserJson = self
            .client
            .get("users/show.json", vec![("user_id", user_id.to_string().into())])
            .await?;
        Ok(user.into())
    }
}
