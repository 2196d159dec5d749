//! Facebook Graph error taxonomy and the status/body translator.
//!
//! Graph errors arrive as `{"error": {"type": "...", "message": "..."}}`,
//! sometimes with HTTP 200, so the translator looks at the body first and
//! falls back to the status code.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use social_common::{ResponseErrorTranslator, SocialError};
use social_http::HttpError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FacebookError {
    #[error(transparent)]
    Social(#[from] SocialError),

    /// The access token lacks an extended permission the operation needs.
    #[error("{message}")]
    InsufficientPermission {
        required_permission: String,
        message: String,
    },

    #[error("{0}")]
    NotAFriend(String),

    /// The object (friend list, post, ...) belongs to someone else.
    #[error("{0}")]
    Ownership(String),

    #[error("{0}")]
    DuplicateStatus(String),

    /// The current user does not administer the page an operation targets.
    #[error("user is not an admin of page {0}")]
    PageAdministration(String),

    /// Graph API error without a more specific mapping; the message is raw.
    #[error("{0}")]
    GraphApi(String),
}

pub type Result<T> = std::result::Result<T, FacebookError>;

/// Maps Graph API responses to [`FacebookError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FacebookErrorHandler;

impl ResponseErrorTranslator for FacebookErrorHandler {
    type Error = FacebookError;

    fn translate(&self, status: u16, body: &str) -> Option<FacebookError> {
        let success = (200..300).contains(&status);
        match graph_error_message(body) {
            Some(message) => Some(
                by_message(&message).unwrap_or_else(|| by_status(status, message, true)),
            ),
            None if success => None,
            None => Some(by_status(status, body.trim().to_string(), false)),
        }
    }
}

static REQUIRED_PERMISSION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Requires extended permission: (\w+)").ok());

/// Message of a Graph `error` object; the trimmed body when it has none.
fn graph_error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    let error = v.get("error")?.as_object()?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim());
    Some(message.to_string())
}

fn required_permission(message: &str) -> Option<String> {
    REQUIRED_PERMISSION
        .as_ref()?
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn by_message(message: &str) -> Option<FacebookError> {
    if let Some(required_permission) = required_permission(message) {
        return Some(FacebookError::InsufficientPermission {
            required_permission,
            message: message.to_string(),
        });
    }
    let owned = || message.to_string();
    let err = if message.contains("The member must be a friend") {
        FacebookError::NotAFriend(owned())
    } else if message.contains("must be an owner") {
        FacebookError::Ownership(owned())
    } else if message.contains("Duplicate status message") {
        FacebookError::DuplicateStatus(owned())
    } else if message.contains("request limit reached") {
        SocialError::RateLimitExceeded(owned()).into()
    } else if message.contains("An active access token must be used") {
        SocialError::BadCredentials(owned()).into()
    } else if message.contains("Error validating access token") {
        if message.contains("expired") {
            SocialError::ExpiredAuthorization(owned()).into()
        } else if message.contains("invalidated") || message.contains("not authorized") {
            SocialError::RevokedAuthorization(owned()).into()
        } else {
            SocialError::InvalidAuthorization(owned()).into()
        }
    } else {
        return None;
    };
    Some(err)
}

/// `graph_payload` is false when the body was not a Graph error object.
fn by_status(status: u16, message: String, graph_payload: bool) -> FacebookError {
    match status {
        200..=299 | 400 if graph_payload => FacebookError::GraphApi(message),
        401 => SocialError::NotConnected(message).into(),
        403 => SocialError::OperationNotPermitted(message).into(),
        404 => SocialError::ResourceNotFound(message).into(),
        500..=599 => SocialError::ServerError { status, message }.into(),
        _ => SocialError::Api { status, message }.into(),
    }
}

impl FacebookErrorHandler {
    pub(crate) fn from_http(&self, err: HttpError) -> FacebookError {
        match err {
            HttpError::Api {
                status,
                message,
                body,
                ..
            } => {
                let status = status.as_u16();
                let translated = self
                    .translate(status, &body)
                    .unwrap_or(SocialError::Api { status, message }.into());
                tracing::debug!(status, error = %translated, "facebook.error.translated");
                translated
            }
            HttpError::Decode(msg, snippet) => {
                SocialError::Decode(format!("{msg} (body: {snippet})")).into()
            }
            other => SocialError::Transport(other.to_string()).into(),
        }
    }
}
