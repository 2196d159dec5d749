//! Facebook Graph API templates.
//!
//! [`FacebookTemplate`] exposes the Graph primitives (fetch an object, fetch
//! a connection, publish, delete, search) and the operation groups built on
//! them. With an access token every request carries
//! `Authorization: OAuth <token>`; without one the template still works for
//! public objects and Graph decides what to refuse.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use social_common::{Connection, ConnectionKey, SocialError};
use social_http::{HttpClient, path_segment};

pub mod error;
mod graph;
pub mod types;

mod comment;
mod event;
mod feed;
mod friend;
mod group;
mod like;
mod media;
mod page;
mod places;
mod user;

pub use comment::{CommentOperations, CommentTemplate};
pub use error::{FacebookError, FacebookErrorHandler, Result};
pub use event::{EventOperations, EventTemplate};
pub use feed::{FeedOperations, FeedTemplate};
pub use friend::{FriendOperations, FriendTemplate};
pub use group::{GroupOperations, GroupTemplate};
pub use like::{LikeOperations, LikeTemplate};
pub use media::{MediaOperations, MediaTemplate};
pub use page::{PageOperations, PageTemplate};
pub use places::{PlacesOperations, PlacesTemplate};
pub use types::{
    Account, Album, Checkin, Comment, Event, EventInvitee, FacebookLink, FacebookProfile, Group,
    GroupMemberReference, Image, ImageType, Invitation, Location, Page, Photo, Post, Privacy,
    Reference, RsvpStatus, Video,
};
pub use user::{UserOperations, UserTemplate};

use graph::{GraphClient, Params};

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/";

/// Entry point to the Graph API.
///
/// ```no_run
/// # async fn demo() -> social_api::facebook::Result<()> {
/// use social_api::facebook::FacebookTemplate;
///
/// let facebook = FacebookTemplate::new("someAccessToken")?;
/// let me = facebook.user_operations().get_user_profile().await?;
/// println!("{:?}", me.name);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct FacebookTemplate {
    graph: Arc<GraphClient>,
    event: EventTemplate,
    group: GroupTemplate,
    places: PlacesTemplate,
    user: UserTemplate,
    friend: FriendTemplate,
    feed: FeedTemplate,
    comment: CommentTemplate,
    like: LikeTemplate,
    media: MediaTemplate,
    page: PageTemplate,
}

impl FacebookTemplate {
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::builder().access_token(access_token).build()
    }

    /// Template without an access token.
    pub fn anonymous() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> FacebookTemplateBuilder {
        FacebookTemplateBuilder::default()
    }

    fn from_graph(graph: GraphClient) -> Self {
        let graph = Arc::new(graph);
        Self {
            event: EventTemplate::new(graph.clone()),
            group: GroupTemplate::new(graph.clone()),
            places: PlacesTemplate::new(graph.clone()),
            user: UserTemplate::new(graph.clone()),
            friend: FriendTemplate::new(graph.clone()),
            feed: FeedTemplate::new(graph.clone()),
            comment: CommentTemplate::new(graph.clone()),
            like: LikeTemplate::new(graph.clone()),
            media: MediaTemplate::new(graph.clone()),
            page: PageTemplate::new(graph.clone()),
            graph,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.graph.is_authorized()
    }

    /// Look up the token's user and bind this template to them.
    pub async fn connect(self) -> Result<Connection<FacebookTemplate>> {
        let profile = self.user.get_user_profile().await?;
        let image_url = format!(
            "{}{}/picture",
            self.graph.http.base(),
            path_segment(&profile.id)
        );
        let mut connection = Connection::new(ConnectionKey::new("facebook", profile.id), self)
            .with_image_url(image_url);
        if let Some(name) = profile.name {
            connection = connection.with_display_name(name);
        }
        if let Some(link) = profile.link {
            connection = connection.with_profile_url(link);
        }
        Ok(connection)
    }

    pub fn event_operations(&self) -> &dyn EventOperations {
        &self.event
    }

    pub fn group_operations(&self) -> &dyn GroupOperations {
        &self.group
    }

    pub fn places_operations(&self) -> &dyn PlacesOperations {
        &self.places
    }

    pub fn user_operations(&self) -> &dyn UserOperations {
        &self.user
    }

    pub fn friend_operations(&self) -> &dyn FriendOperations {
        &self.friend
    }

    pub fn feed_operations(&self) -> &dyn FeedOperations {
        &self.feed
    }

    pub fn comment_operations(&self) -> &dyn CommentOperations {
        &self.comment
    }

    pub fn like_operations(&self) -> &dyn LikeOperations {
        &self.like
    }

    pub fn media_operations(&self) -> &dyn MediaOperations {
        &self.media
    }

    pub fn page_operations(&self) -> &dyn PageOperations {
        &self.page
    }

    // ----- Graph primitives -----

    pub async fn fetch_object<T: DeserializeOwned>(&self, object_id: &str) -> Result<T> {
        self.graph.fetch_object(object_id, Vec::new()).await
    }

    /// Fetch only the named fields of an object.
    pub async fn fetch_object_with_fields<T: DeserializeOwned>(
        &self,
        object_id: &str,
        fields: &[&str],
    ) -> Result<T> {
        let query: Params<'_> = vec![("fields", fields.join(",").into())];
        self.graph.fetch_object(object_id, query).await
    }

    pub async fn fetch_connections<T: DeserializeOwned>(
        &self,
        object_id: &str,
        connection: &str,
    ) -> Result<Vec<T>> {
        self.graph
            .fetch_connections(object_id, &encode_connection(connection), Vec::new())
            .await
    }

    pub async fn fetch_image(
        &self,
        object_id: &str,
        connection: &str,
        image_type: ImageType,
    ) -> Result<Vec<u8>> {
        self.graph
            .fetch_image(object_id, &encode_connection(connection), image_type)
            .await
    }

    /// Create an object under `{object_id}/{connection}`; returns its id.
    pub async fn publish(
        &self,
        object_id: &str,
        connection: &str,
        data: &[(&str, &str)],
    ) -> Result<String> {
        self.graph
            .publish(object_id, &encode_connection(connection), to_params(data))
            .await
    }

    /// POST to a connection without expecting an object back.
    pub async fn post(&self, object_id: &str, connection: &str, data: &[(&str, &str)]) -> Result<()> {
        self.graph
            .post(object_id, &encode_connection(connection), to_params(data))
            .await
    }

    pub async fn delete(&self, object_id: &str) -> Result<()> {
        self.graph.delete(object_id).await
    }

    pub async fn delete_connection(&self, object_id: &str, connection: &str) -> Result<()> {
        self.graph
            .delete_connection(object_id, &encode_connection(connection))
            .await
    }

    /// Graph search, `object_type` being `event`, `group`, `user`, `page`, ...
    pub async fn search<T: DeserializeOwned>(&self, query: &str, object_type: &str) -> Result<Vec<T>> {
        self.graph.search(query, object_type).await
    }
}

/// Caller-supplied connections may name a sub-path (`members/42`); each of
/// its segments is encoded on its own.
fn encode_connection(connection: &str) -> String {
    connection
        .split('/')
        .map(path_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn to_params<'a>(data: &[(&'a str, &'a str)]) -> Params<'a> {
    data.iter().map(|(k, v)| (*k, (*v).into())).collect()
}

/// Configures the endpoint, token and HTTP behaviour of a [`FacebookTemplate`].
#[derive(Debug, Default)]
pub struct FacebookTemplateBuilder {
    access_token: Option<String>,
    graph_url: Option<String>,
    timeout: Option<Duration>,
    retries: Option<usize>,
}

impl FacebookTemplateBuilder {
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn graph_url(mut self, url: impl Into<String>) -> Self {
        self.graph_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Retry budget for 429/5xx responses. Defaults to no retries.
    pub fn retries(mut self, retries: usize) -> Self {
        self.retries = Some(retries);
        self
    }

    pub fn build(self) -> Result<FacebookTemplate> {
        let base = self.graph_url.as_deref().unwrap_or(DEFAULT_GRAPH_URL);
        let mut http = HttpClient::new(base)
            .map_err(|e| SocialError::Config(format!("facebook endpoint {base}: {e}")))?;
        if let Some(timeout) = self.timeout {
            http = http.with_timeout(timeout);
        }
        if let Some(retries) = self.retries {
            http = http.with_retries(retries);
        }
        let access_token = self.access_token.filter(|t| !t.trim().is_empty());
        tracing::debug!(
            graph = %http.base(),
            authorized = access_token.is_some(),
            "facebook.template.built"
        );
        Ok(FacebookTemplate::from_graph(GraphClient {
            http,
            access_token,
            errors: FacebookErrorHandler,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_mean_anonymous() {
        assert!(!FacebookTemplate::new("  ").unwrap().is_authorized());
        assert!(!FacebookTemplate::anonymous().unwrap().is_authorized());
        assert!(FacebookTemplate::new("someAccessToken").unwrap().is_authorized());
    }

    #[test]
    fn default_graph_endpoint() {
        let facebook = FacebookTemplate::anonymous().unwrap();
        assert_eq!(facebook.graph.http.base().as_str(), DEFAULT_GRAPH_URL);
        assert_eq!(facebook.graph.http.max_retries, 0);
    }

    #[test]
    fn connection_segments_are_encoded_one_by_one() {
        assert_eq!(encode_connection("members/42"), "members/42");
        assert_eq!(encode_connection("feed?limit=1"), "feed%3Flimit%3D1");
        assert_eq!(encode_connection("http://x/"), "http%3A//x/");
    }

    #[test]
    fn bad_endpoint_is_a_config_error() {
        let err = FacebookTemplate::builder().graph_url("::").build().unwrap_err();
        assert!(matches!(err, FacebookError::Social(SocialError::Config(_))));
    }
}
