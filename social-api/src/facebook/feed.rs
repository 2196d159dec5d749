use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::graph::{GraphClient, Params};
use super::types::{FacebookLink, Post};

/// Wall and news feed posts.
#[async_trait]
pub trait FeedOperations: Send + Sync {
    async fn get_feed(&self) -> Result<Vec<Post>>;

    async fn get_feed_for(&self, owner_id: &str) -> Result<Vec<Post>>;

    /// The current user's news feed.
    async fn get_home_feed(&self) -> Result<Vec<Post>>;

    async fn get_post(&self, post_id: &str) -> Result<Post>;

    /// Returns the new post's id.
    async fn update_status(&self, message: &str) -> Result<String>;

    async fn post_link(&self, message: &str, link: &FacebookLink) -> Result<String>;

    async fn delete_post(&self, post_id: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FeedTemplate {
    graph: Arc<GraphClient>,
}

impl FeedTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

pub(super) fn link_form<'a>(message: &'a str, link: &'a FacebookLink) -> Params<'a> {
    let mut form: Params<'a> = vec![("link", link.link.as_str().into())];
    let optional = [
        ("name", &link.name),
        ("caption", &link.caption),
        ("description", &link.description),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            form.push((key, value.as_str().into()));
        }
    }
    form.push(("message", message.into()));
    form
}

#[async_trait]
impl FeedOperations for FeedTemplate {
    async fn get_feed(&self) -> Result<Vec<Post>> {
        self.get_feed_for("me").await
    }

    async fn get_feed_for(&self, owner_id: &str) -> Result<Vec<Post>> {
        self.graph
            .fetch_connections(owner_id, "feed", Vec::new())
            .await
    }

    async fn get_home_feed(&self) -> Result<Vec<Post>> {
        self.graph.fetch_connections("me", "home", Vec::new()).await
    }

    async fn get_post(&self, post_id: &str) -> Result<Post> {
        self.graph.fetch_object(post_id, Vec::new()).await
    }

    async fn update_status(&self, message: &str) -> Result<String> {
        self.graph
            .publish("me", "feed", vec![("message", message.into())])
            .await
    }

    async fn post_link(&self, message: &str, link: &FacebookLink) -> Result<String> {
        self.graph
            .publish("me", "feed", link_form(message, link))
            .await
    }

    async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.graph.delete(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_form_skips_missing_fields() {
        let link = FacebookLink::new("http://www.springsource.org").caption("SpringSource");
        let form = link_form("Check this out", &link);
        let names: Vec<_> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, ["link", "caption", "message"]);
        assert_eq!(form[2].1, "Check this out");
    }
}
