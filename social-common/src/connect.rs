//! Pass-through connection values.
//!
//! A [`Connection`] pairs a provider user with the API handle that acts on
//! their behalf. Nothing here is stored; callers keep connections wherever
//! they like and hand them back in.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, SocialError};

/// Identifies a provider user: `(provider_id, provider_user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionKey {
    pub provider_id: String,
    pub provider_user_id: String,
}

impl ConnectionKey {
    pub fn new(provider_id: impl Into<String>, provider_user_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            provider_user_id: provider_user_id.into(),
        }
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_id, self.provider_user_id)
    }
}

/// A provider user bound to an API handle, with optional display data and expiry.
#[derive(Debug, Clone)]
pub struct Connection<A> {
    key: ConnectionKey,
    api: A,
    pub display_name: Option<String>,
    pub profile_url: Option<String>,
    pub image_url: Option<String>,
    expire_time: Option<DateTime<Utc>>,
}

impl<A> Connection<A> {
    pub fn new(key: ConnectionKey, api: A) -> Self {
        Self {
            key,
            api,
            display_name: None,
            profile_url: None,
            image_url: None,
            expire_time: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Mark the connection as unusable from `at` onwards.
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expire_time = Some(at);
        self
    }

    pub fn key(&self) -> &ConnectionKey {
        &self.key
    }

    pub fn expire_time(&self) -> Option<DateTime<Utc>> {
        self.expire_time
    }

    pub fn has_expired(&self) -> bool {
        self.has_expired_at(Utc::now())
    }

    pub fn has_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_time.is_some_and(|t| now >= t)
    }

    /// Borrow the API handle, refusing once the connection has expired.
    pub fn api(&self) -> Result<&A> {
        if self.has_expired() {
            tracing::debug!(connection = %self.key, "connection.expired");
            return Err(SocialError::ConnectionExpired(self.key.clone()));
        }
        Ok(&self.api)
    }

    /// Swap the API handle, keeping key, display data and expiry.
    pub fn map_api<B>(self, f: impl FnOnce(A) -> B) -> Connection<B> {
        Connection {
            key: self.key,
            api: f(self.api),
            display_name: self.display_name,
            profile_url: self.profile_url,
            image_url: self.image_url,
            expire_time: self.expire_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn key_displays_as_provider_and_user() {
        let key = ConnectionKey::new("facebook", "100001387295207");
        assert_eq!(key.to_string(), "facebook:100001387295207");
    }

    #[test]
    fn live_connection_hands_out_api() {
        let conn = Connection::new(ConnectionKey::new("twitter", "habuma"), 42u32)
            .with_display_name("@habuma")
            .expires_at(Utc::now() + Duration::hours(1));
        assert_eq!(*conn.api().unwrap(), 42);
        assert_eq!(conn.display_name.as_deref(), Some("@habuma"));
    }

    #[test]
    fn expired_connection_is_refused() {
        let key = ConnectionKey::new("twitter", "habuma");
        let conn = Connection::new(key.clone(), ()).expires_at(Utc::now() - Duration::seconds(1));
        assert!(conn.has_expired());
        assert_eq!(conn.api().unwrap_err(), SocialError::ConnectionExpired(key));
    }

    #[test]
    fn connection_without_expiry_never_expires() {
        let conn = Connection::new(ConnectionKey::new("twitter", "x"), ());
        assert!(!conn.has_expired_at(Utc::now() + Duration::days(3650)));
    }

    #[test]
    fn map_api_keeps_metadata() {
        let conn = Connection::new(ConnectionKey::new("twitter", "x"), 1u8)
            .with_profile_url("http://twitter.com/x")
            .map_api(|n| n.to_string());
        assert_eq!(conn.api().unwrap(), "1");
        assert_eq!(conn.profile_url.as_deref(), Some("http://twitter.com/x"));
    }
}
