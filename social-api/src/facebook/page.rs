use std::sync::Arc;

use async_trait::async_trait;

use super::error::{FacebookError, Result};
use super::feed::link_form;
use super::graph::{GraphClient, Params};
use super::types::{Account, FacebookLink, Page};

/// Pages, and posting to pages the current user administers.
#[async_trait]
pub trait PageOperations: Send + Sync {
    async fn get_page(&self, page_id: &str) -> Result<Page>;

    async fn is_page_admin(&self, page_id: &str) -> Result<bool>;

    /// Pages the current user administers.
    async fn get_accounts(&self) -> Result<Vec<Account>>;

    /// Post a message to a page's wall as the page; returns the post id.
    async fn post(&self, page_id: &str, message: &str) -> Result<String>;

    async fn post_link(&self, page_id: &str, message: &str, link: &FacebookLink)
    -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct PageTemplate {
    graph: Arc<GraphClient>,
}

impl PageTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }

    async fn account(&self, page_id: &str) -> Result<Option<Account>> {
        let accounts = self.get_accounts().await?;
        Ok(accounts.into_iter().find(|a| a.id == page_id))
    }

    /// The page's own token; publishing with the user token posts as the user.
    async fn page_access_token(&self, page_id: &str) -> Result<String> {
        self.account(page_id)
            .await?
            .and_then(|a| a.access_token)
            .ok_or_else(|| FacebookError::PageAdministration(page_id.to_string()))
    }

    async fn publish_as_page(&self, page_id: &str, mut form: Params<'_>) -> Result<String> {
        let token = self.page_access_token(page_id).await?;
        form.push(("access_token", token.into()));
        let id = self.graph.publish(page_id, "feed", form).await?;
        tracing::debug!(page_id, post_id = %id, "facebook.page.posted");
        Ok(id)
    }
}

#[async_trait]
impl PageOperations for PageTemplate {
    async fn get_page(&self, page_id: &str) -> Result<Page> {
        self.graph.fetch_object(page_id, Vec::new()).await
    }

    async fn is_page_admin(&self, page_id: &str) -> Result<bool> {
        Ok(self.account(page_id).await?.is_some())
    }

    async fn get_accounts(&self) -> Result<Vec<Account>> {
        self.graph
            .fetch_connections("me", "accounts", Vec::new())
            .await
    }

    async fn post(&self, page_id: &str, message: &str) -> Result<String> {
        self.publish_as_page(page_id, vec![("message", message.into())])
            .await
    }

    async fn post_link(
        &self,
        page_id: &str,
        message: &str,
        link: &FacebookLink,
    ) -> Result<String> {
        self.publish_as_page(page_id, link_form(message, link))
            .await
    }
}
