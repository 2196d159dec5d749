//! Typed clients ("templates") for the Twitter REST API and the Facebook
//! Graph API.
//!
//! Each provider exposes one API template that owns the authenticated HTTP
//! client and hands out operation groups (timeline, friends, events, ...).
//! Every operation follows the same pipeline: build the URL and parameters,
//! sign the request, call the provider, then either map the JSON payload into
//! domain types or translate the error payload into a typed error.
//!
//! ```no_run
//! # async fn demo() -> Result<(), social_api::twitter::TwitterError> {
//! use social_api::twitter::TwitterTemplate;
//!
//! let twitter = TwitterTemplate::unauthorized()?;
//! let results = twitter.search_operations().search("#rust").await?;
//! for tweet in results.tweets {
//!     println!("@{}: {}", tweet.from_user, tweet.text);
//! }
//! # Ok(()) }
//! ```
pub mod facebook;
pub mod twitter;

mod dates;
