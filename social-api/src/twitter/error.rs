//! Twitter error taxonomy and the status/body translator.

use social_common::{ResponseErrorTranslator, SocialError};
use social_http::HttpError;

/// Errors raised by the Twitter templates.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TwitterError {
    #[error(transparent)]
    Social(#[from] SocialError),

    /// The status text repeats the user's previous tweet.
    #[error("{0}")]
    DuplicateTweet(String),

    /// A follow/unfollow was refused (already following, not following, ...).
    #[error("{0}")]
    FriendshipFailure(String),
}

pub type Result<T> = std::result::Result<T, TwitterError>;

const FRIENDSHIP_FAILURES: [&str; 3] = [
    "Could not follow user",
    "You are not friends",
    "already requested to follow",
];

/// Maps Twitter REST responses to [`TwitterError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TwitterErrorHandler;

impl ResponseErrorTranslator for TwitterErrorHandler {
    type Error = TwitterError;

    fn translate(&self, status: u16, body: &str) -> Option<TwitterError> {
        if (200..300).contains(&status) {
            return None;
        }
        let message = social_http::error_message(body.as_bytes())
            .unwrap_or_else(|| body.trim().to_string());

        let err: TwitterError = match status {
            400 if message.contains("Rate limit exceeded") => {
                SocialError::RateLimitExceeded(message).into()
            }
            401 => SocialError::NotConnected(message).into(),
            403 if message.to_ascii_lowercase().contains("already said that") => {
                TwitterError::DuplicateTweet(message)
            }
            403 if FRIENDSHIP_FAILURES.iter().any(|m| message.contains(m)) => {
                TwitterError::FriendshipFailure(message)
            }
            403 => SocialError::OperationNotPermitted(message).into(),
            404 => SocialError::ResourceNotFound(message).into(),
            420 | 429 => SocialError::RateLimitExceeded(message).into(),
            500..=599 => SocialError::ServerError { status, message }.into(),
            _ => SocialError::Api { status, message }.into(),
        };
        Some(err)
    }
}

impl TwitterErrorHandler {
    /// Turn a transport-level failure into a [`TwitterError`], translating
    /// provider error payloads on the way.
    pub(crate) fn from_http(&self, err: HttpError) -> TwitterError {
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
                tracing::debug!(status, error = %translated, "twitter.error.translated");
                translated
            }
            HttpError::Decode(msg, snippet) => {
                SocialError::Decode(format!("{msg} (body: {snippet})")).into()
            }
            other => SocialError::Transport(other.to_string()).into(),
        }
    }
}
