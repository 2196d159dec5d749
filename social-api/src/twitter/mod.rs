//! Twitter REST API (v1) templates.
//!
//! [`TwitterTemplate`] owns one HTTP client for `api.twitter.com` and one for
//! `search.twitter.com` and hands out the operation groups. Built with OAuth
//! 1.0a credentials it signs every request; built anonymously it can still
//! search and read public data, and user-context operations fail with
//! [`SocialError::MissingAuthorization`] before any request is made.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use social_common::{Connection, ConnectionKey, SocialError};
use social_http::{Auth, HttpClient, OAuth1Credentials, RequestOpts};

pub mod error;
mod json;
pub mod types;

mod direct_message;
mod friend;
mod list;
mod search;
mod timeline;
mod user;

pub use direct_message::{DirectMessageOperations, DirectMessageTemplate};
pub use error::{Result, TwitterError, TwitterErrorHandler};
pub use friend::{FriendOperations, FriendTemplate};
pub use list::{ListOperations, ListTemplate};
pub use search::{DEFAULT_RESULTS_PER_PAGE, SearchOperations, SearchTemplate};
pub use timeline::{TimelineOperations, TimelineTemplate};
pub use types::{DirectMessage, SearchResults, StatusDetails, Tweet, TwitterProfile, UserList};
pub use user::{UserOperations, UserTemplate};

pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1/";
pub const DEFAULT_SEARCH_URL: &str = "https://search.twitter.com/";

const PROVIDER: &str = "twitter";

pub(crate) type Params<'a> = Vec<(&'a str, Cow<'a, str>)>;

/// Shared request plumbing behind every Twitter operation group.
#[derive(Debug)]
pub(crate) struct TwitterClient {
    api: HttpClient,
    search: HttpClient,
    credentials: Option<OAuth1Credentials>,
    errors: TwitterErrorHandler,
}

impl TwitterClient {
    fn opts<'a>(&'a self, query: Params<'a>, form: Params<'a>) -> RequestOpts<'a> {
        RequestOpts {
            auth: self.credentials.as_ref().map(Auth::OAuth1),
            query: (!query.is_empty()).then_some(query),
            form: (!form.is_empty()).then_some(form),
            ..Default::default()
        }
    }

    pub(crate) fn is_authorized(&self) -> bool {
        self.credentials.is_some()
    }

    pub(crate) fn require_authorization(&self) -> Result<()> {
        if self.is_authorized() {
            Ok(())
        } else {
            Err(SocialError::MissingAuthorization { provider: PROVIDER }.into())
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: Params<'_>) -> Result<T> {
        tracing::debug!(path, "twitter.get");
        self.api
            .get_json(path, self.opts(query, Vec::new()))
            .await
            .map_err(|e| self.errors.from_http(e))
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Params<'_>,
        form: Params<'_>,
    ) -> Result<T> {
        tracing::debug!(path, "twitter.post");
        self.api
            .post_form_json(path, self.opts(query, form))
            .await
            .map_err(|e| self.errors.from_http(e))
    }

    pub(crate) async fn search<T: DeserializeOwned>(&self, query: Params<'_>) -> Result<T> {
        tracing::debug!("twitter.search");
        self.search
            .get_json("search.json", self.opts(query, Vec::new()))
            .await
            .map_err(|e| self.errors.from_http(e))
    }
}

/// Entry point to the Twitter API.
///
/// ```no_run
/// # async fn demo() -> social_api::twitter::Result<()> {
/// use social_api::twitter::TwitterTemplate;
/// use social_http::OAuth1Credentials;
///
/// let twitter = TwitterTemplate::new(OAuth1Credentials::new("ck", "cs", "at", "ats"))?;
/// twitter.timeline_operations().update_status("Hello from Rust").await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct TwitterTemplate {
    client: Arc<TwitterClient>,
    user: UserTemplate,
    timeline: TimelineTemplate,
    friend: FriendTemplate,
    search: SearchTemplate,
    direct_message: DirectMessageTemplate,
    list: ListTemplate,
}

impl TwitterTemplate {
    /// Template acting on behalf of the user the credentials belong to.
    pub fn new(credentials: OAuth1Credentials) -> Result<Self> {
        Self::builder().credentials(credentials).build()
    }

    /// Template without a user context.
    pub fn unauthorized() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> TwitterTemplateBuilder {
        TwitterTemplateBuilder::default()
    }

    fn from_client(client: TwitterClient) -> Self {
        let client = Arc::new(client);
        Self {
            user: UserTemplate::new(client.clone()),
            timeline: TimelineTemplate::new(client.clone()),
            friend: FriendTemplate::new(client.clone()),
            search: SearchTemplate::new(client.clone()),
            direct_message: DirectMessageTemplate::new(client.clone()),
            list: ListTemplate::new(client.clone()),
            client,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.client.is_authorized()
    }

    /// Look up the authenticated user and bind this template to them.
    pub async fn connect(self) -> Result<Connection<TwitterTemplate>> {
        let profile = self.user.get_user_profile().await?;
        let key = ConnectionKey::new(PROVIDER, profile.id.to_string());
        let mut connection = Connection::new(key, self)
            .with_display_name(format!("@{}", profile.screen_name))
            .with_profile_url(format!("http://twitter.com/{}", profile.screen_name));
        if let Some(image) = profile.profile_image_url {
            connection = connection.with_image_url(image);
        }
        Ok(connection)
    }

    pub fn user_operations(&self) -> &dyn UserOperations {
        &self.user
    }

    pub fn timeline_operations(&self) -> &dyn TimelineOperations {
        &self.timeline
    }

    pub fn friend_operations(&self) -> &dyn FriendOperations {
        &self.friend
    }

    pub fn search_operations(&self) -> &dyn SearchOperations {
        &self.search
    }

    pub fn direct_message_operations(&self) -> &dyn DirectMessageOperations {
        &self.direct_message
    }

    pub fn list_operations(&self) -> &dyn ListOperations {
        &self.list
    }
}

/// Configures endpoints, credentials and HTTP behaviour of a [`TwitterTemplate`].
#[derive(Debug, Default)]
pub struct TwitterTemplateBuilder {
    credentials: Option<OAuth1Credentials>,
    api_url: Option<String>,
    search_url: Option<String>,
    timeout: Option<Duration>,
    retries: Option<usize>,
}

impl TwitterTemplateBuilder {
    pub fn credentials(mut self, credentials: OAuth1Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = Some(url.into());
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

    pub fn build(self) -> Result<TwitterTemplate> {
        let api = self.client_for(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))?;
        let search = self.client_for(self.search_url.as_deref().unwrap_or(DEFAULT_SEARCH_URL))?;
        tracing::debug!(
            api = %api.base(),
            search = %search.base(),
            authorized = self.credentials.is_some(),
            "twitter.template.built"
        );
        Ok(TwitterTemplate::from_client(TwitterClient {
            api,
            search,
            credentials: self.credentials,
            errors: TwitterErrorHandler,
        }))
    }

    fn client_for(&self, base: &str) -> Result<HttpClient> {
        let mut client = HttpClient::new(base)
            .map_err(|e| SocialError::Config(format!("twitter endpoint {base}: {e}")))?;
        if let Some(timeout) = self.timeout {
            client = client.with_timeout(timeout);
        }
        if let Some(retries) = self.retries {
            client = client.with_retries(retries);
        }
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_template_is_not_authorized() {
        let twitter = TwitterTemplate::unauthorized().unwrap();
        assert!(!twitter.is_authorized());
        assert_eq!(
            twitter.client.require_authorization().unwrap_err(),
            TwitterError::Social(SocialError::MissingAuthorization { provider: "twitter" })
        );
    }

    #[test]
    fn default_endpoints() {
        let twitter = TwitterTemplate::new(OAuth1Credentials::new("a", "b", "c", "d")).unwrap();
        assert!(twitter.is_authorized());
        assert_eq!(twitter.client.api.base().as_str(), DEFAULT_API_URL);
        assert_eq!(twitter.client.search.base().as_str(), DEFAULT_SEARCH_URL);
        assert_eq!(twitter.client.api.max_retries, 0);
    }

    #[test]
    fn bad_endpoint_is_a_config_error() {
        let err = TwitterTemplate::builder().api_url("not a url").build().unwrap_err();
        assert!(matches!(err, TwitterError::Social(SocialError::Config(_))));
    }
}
