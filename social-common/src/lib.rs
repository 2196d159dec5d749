//! Common types shared by the social API crates.
//!
//! This crate holds the provider-neutral error taxonomy, the contract every
//! provider error translator implements, the pass-through [`Connection`]
//! value type, and the tracing initialiser used by binaries and tests.
//!
//! # Overview
//!
//! - [`SocialError`] and [`Result`]: errors every provider can raise
//! - [`ResponseErrorTranslator`]: status + body to typed error
//! - [`Connection`] / [`ConnectionKey`]: a provider user bound to an API handle
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use social_common::{ConnectionKey, SocialError};
//!
//! let key = ConnectionKey::new("twitter", "habuma");
//! let err = SocialError::ConnectionExpired(key);
//! assert_eq!(err.to_string(), "connection twitter:habuma has expired");
//! ```

pub mod connect;
pub mod observability;

pub use connect::{Connection, ConnectionKey};

/// Errors any provider template may surface.
///
/// Message-carrying variants display the provider's message verbatim so that
/// callers can show it to users unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SocialError {
    /// The provider rejected the request because no user is connected (HTTP 401).
    #[error("{0}")]
    NotConnected(String),

    /// The operation needs a user context but the template was built anonymously.
    #[error("authorization is required for this {provider} operation")]
    MissingAuthorization { provider: &'static str },

    /// Credentials were missing from a request that requires them.
    #[error("{0}")]
    BadCredentials(String),

    /// The access token was rejected as malformed or unknown.
    #[error("{0}")]
    InvalidAuthorization(String),

    /// The access token has expired.
    #[error("{0}")]
    ExpiredAuthorization(String),

    /// The user revoked the application's access.
    #[error("{0}")]
    RevokedAuthorization(String),

    /// A pass-through connection was used past its expiry.
    #[error("connection {0} has expired")]
    ConnectionExpired(ConnectionKey),

    /// The provider refused the operation (HTTP 403 without a more specific cause).
    #[error("{0}")]
    OperationNotPermitted(String),

    #[error("{0}")]
    ResourceNotFound(String),

    #[error("{0}")]
    RateLimitExceeded(String),

    /// The provider failed on its side (HTTP 5xx).
    #[error("{message}")]
    ServerError { status: u16, message: String },

    /// Any provider error without a dedicated mapping; carries the raw message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived but could not be mapped into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SocialError {
    /// True when the error means the stored credentials are no longer usable
    /// and the user has to reconnect.
    pub fn requires_reconnect(&self) -> bool {
        matches!(
            self,
            SocialError::NotConnected(_)
                | SocialError::InvalidAuthorization(_)
                | SocialError::ExpiredAuthorization(_)
                | SocialError::RevokedAuthorization(_)
                | SocialError::ConnectionExpired(_)
        )
    }

    /// HTTP status attached to the error, when the provider sent one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SocialError::ServerError { status, .. } | SocialError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Convenient alias for results that use [`SocialError`].
pub type Result<T> = std::result::Result<T, SocialError>;

/// Maps a provider response into a typed error.
///
/// Implementations return `None` when the response does not describe an error,
/// which is the case for ordinary 2xx payloads. Some providers report errors in
/// a 2xx body, so translators receive the body for successful statuses too.
pub trait ResponseErrorTranslator: Send + Sync {
    type Error;

    fn translate(&self, status: u16, body: &str) -> Option<Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_variants_display_provider_text() {
        let err = SocialError::OperationNotPermitted("Forbidden".into());
        assert_eq!(err.to_string(), "Forbidden");

        let err = SocialError::ServerError {
            status: 503,
            message: "Over capacity".into(),
        };
        assert_eq!(err.to_string(), "Over capacity");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn missing_authorization_names_provider() {
        let err = SocialError::MissingAuthorization {
            provider: "twitter",
        };
        assert_eq!(
            err.to_string(),
            "authorization is required for this twitter operation"
        );
        assert!(!err.requires_reconnect());
    }

    #[test]
    fn authorization_failures_require_reconnect() {
        assert!(SocialError::NotConnected("x".into()).requires_reconnect());
        assert!(SocialError::RevokedAuthorization("x".into()).requires_reconnect());
        assert!(
            SocialError::ConnectionExpired(ConnectionKey::new("facebook", "1")).requires_reconnect()
        );
        assert!(!SocialError::RateLimitExceeded("x".into()).requires_reconnect());
    }
}
