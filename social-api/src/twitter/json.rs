//! Wire shapes of the Twitter v1 payloads and their mapping into domain types.

use serde::{Deserialize, Deserializer};

use super::types::{DirectMessage, SearchResults, Tweet, TwitterProfile, UserList};
use crate::dates::{parse_search_date, parse_timeline_date};

/// Ids arrive as JSON numbers, or as strings in `*_str` style payloads.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Num(u64),
    Str(String),
}

impl IdRepr {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            IdRepr::Num(n) => Ok(n),
            IdRepr::Str(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

fn id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    IdRepr::deserialize(d)?.into_u64()
}

fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Option::<IdRepr>::deserialize(d)?
        .map(IdRepr::into_u64::<D::Error>)
        .transpose()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserJson {
    #[serde(deserialize_with = "id")]
    id: u64,
    screen_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    profile_image_url: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<UserJson> for TwitterProfile {
    fn from(u: UserJson) -> Self {
        TwitterProfile {
            id: u.id,
            name: u.name.unwrap_or_default(),
            screen_name: u.screen_name,
            description: non_empty(u.description),
            location: non_empty(u.location),
            url: non_empty(u.url),
            profile_image_url: non_empty(u.profile_image_url),
            created_date: u.created_at.as_deref().and_then(parse_timeline_date),
        }
    }
}

/// Only the screen name matters for friend/follower listings and follow replies.
#[derive(Debug, Deserialize)]
pub(crate) struct ScreenNameJson {
    pub(crate) screen_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CredentialsJson {
    pub(crate) screen_name: String,
}

#[derive(Debug, Deserialize)]
struct TweetUserJson {
    #[serde(deserialize_with = "id")]
    id: u64,
    screen_name: String,
    #[serde(default)]
    profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineTweetJson {
    #[serde(deserialize_with = "id")]
    id: u64,
    text: String,
    user: TweetUserJson,
    #[serde(default)]
    source: Option<String>,
    #[serde(default, deserialize_with = "opt_id")]
    in_reply_to_user_id: Option<u64>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<TimelineTweetJson> for Tweet {
    fn from(t: TimelineTweetJson) -> Self {
        Tweet {
            id: t.id,
            text: t.text,
            from_user: t.user.screen_name,
            from_user_id: t.user.id,
            to_user_id: t.in_reply_to_user_id,
            profile_image_url: t.user.profile_image_url,
            source: t.source,
            language_code: None,
            created_at: t.created_at.as_deref().and_then(parse_timeline_date),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchTweetJson {
    #[serde(deserialize_with = "id")]
    id: u64,
    from_user: String,
    text: String,
    #[serde(deserialize_with = "id")]
    from_user_id: u64,
    #[serde(default, deserialize_with = "opt_id")]
    to_user_id: Option<u64>,
    #[serde(default)]
    iso_language_code: Option<String>,
    #[serde(default)]
    profile_image_url: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<SearchTweetJson> for Tweet {
    fn from(t: SearchTweetJson) -> Self {
        Tweet {
            id: t.id,
            text: t.text,
            from_user: t.from_user,
            from_user_id: t.from_user_id,
            to_user_id: t.to_user_id,
            profile_image_url: t.profile_image_url,
            source: t.source,
            language_code: t.iso_language_code,
            created_at: t.created_at.as_deref().and_then(parse_search_date),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponseJson {
    #[serde(default)]
    results: Vec<SearchTweetJson>,
    #[serde(default, deserialize_with = "opt_id")]
    max_id: Option<u64>,
    #[serde(default, deserialize_with = "opt_id")]
    since_id: Option<u64>,
    #[serde(default)]
    next_page: Option<String>,
}

impl From<SearchResponseJson> for SearchResults {
    fn from(r: SearchResponseJson) -> Self {
        SearchResults {
            last_page: r.next_page.is_none(),
            max_id: r.max_id.unwrap_or(0),
            since_id: r.since_id.unwrap_or(0),
            tweets: r.results.into_iter().map(Tweet::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectMessageJson {
    #[serde(deserialize_with = "id")]
    id: u64,
    text: String,
    #[serde(deserialize_with = "id")]
    sender_id: u64,
    sender_screen_name: String,
    #[serde(deserialize_with = "id")]
    recipient_id: u64,
    recipient_screen_name: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<DirectMessageJson> for DirectMessage {
    fn from(m: DirectMessageJson) -> Self {
        DirectMessage {
            id: m.id,
            text: m.text,
            sender_id: m.sender_id,
            sender_screen_name: m.sender_screen_name,
            recipient_id: m.recipient_id,
            recipient_screen_name: m.recipient_screen_name,
            created_at: m.created_at.as_deref().and_then(parse_timeline_date),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserListJson {
    #[serde(deserialize_with = "id")]
    id: u64,
    name: String,
    full_name: String,
    slug: String,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    member_count: u32,
    #[serde(default)]
    subscriber_count: u32,
}

impl From<UserListJson> for UserList {
    fn from(l: UserListJson) -> Self {
        UserList {
            id: l.id,
            name: l.name,
            full_name: l.full_name,
            slug: l.slug,
            uri: l.uri,
            description: non_empty(l.description),
            public: l.mode.as_deref() != Some("private"),
            member_count: l.member_count,
            subscriber_count: l.subscriber_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListsJson {
    #[serde(default)]
    pub(crate) lists: Vec<UserListJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersJson {
    #[serde(default)]
    pub(crate) users: Vec<UserJson>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let t: TimelineTweetJson = serde_json::from_value(json!({
            "id": "12345",
            "text": "hi",
            "in_reply_to_user_id": null,
            "user": {"id": 1, "screen_name": "habuma"}
        }))
        .unwrap();
        let tweet = Tweet::from(t);
        assert_eq!(tweet.id, 12345);
        assert_eq!(tweet.to_user_id, None);
        assert_eq!(tweet.created_at, None);
    }

    #[test]
    fn bad_ids_are_errors() {
        let r: Result<TimelineTweetJson, _> = serde_json::from_value(json!({
            "id": "abc", "text": "hi", "user": {"id": 1, "screen_name": "x"}
        }));
        assert!(r.is_err());
    }

    #[test]
    fn search_without_ids_defaults_to_zero() {
        let r: SearchResponseJson = serde_json::from_value(json!({
            "results": [],
            "next_page": "?page=2&q=rust"
        }))
        .unwrap();
        let results = SearchResults::from(r);
        assert_eq!((results.max_id, results.since_id), (0, 0));
        assert!(!results.last_page);
    }

    #[test]
    fn empty_profile_fields_become_none() {
        let u: UserJson = serde_json::from_value(json!({
            "id": 7, "screen_name": "x", "name": "X", "url": "", "description": null,
            "created_at": "not a date"
        }))
        .unwrap();
        let p = TwitterProfile::from(u);
        assert_eq!(p.url, None);
        assert_eq!(p.description, None);
        assert_eq!(p.created_date, None);
    }

    #[test]
    fn private_lists() {
        let l: UserListJson = serde_json::from_value(json!({
            "id": 1, "name": "n", "full_name": "@a/n", "slug": "n", "mode": "private"
        }))
        .unwrap();
        assert!(!UserList::from(l).public);
    }
}
