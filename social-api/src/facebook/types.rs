//! Graph API objects. Ids are strings; timestamps go through the Graph
//! time parser and become `None` when unreadable.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::parse_graph_time;

fn graph_time<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .as_deref()
        .and_then(parse_graph_time))
}

/// Unwraps a nested `{"data": [...]}` connection.
fn data_list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    struct Data<T> {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    }
    Ok(Option::<Data<T>>::deserialize(d)?
        .map(|d| d.data)
        .unwrap_or_default())
}

/// Like counts show up as a number or as a `{"count": n}` object.
fn like_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Likes {
        Count(u32),
        Object {
            #[serde(default)]
            count: u32,
        },
    }
    Ok(match Option::<Likes>::deserialize(d)? {
        Some(Likes::Count(n)) | Some(Likes::Object { count: n }) => n,
        None => 0,
    })
}

/// A named pointer to another Graph object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacebookProfile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    Open,
    Closed,
    Secret,
}

impl<'de> Deserialize<'de> for Privacy {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.to_ascii_lowercase().as_str() {
            "open" => Ok(Privacy::Open),
            "closed" => Ok(Privacy::Closed),
            "secret" => Ok(Privacy::Secret),
            other => Err(serde::de::Error::custom(format!("unknown privacy `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Attending,
    Maybe,
    Declined,
    NotReplied,
}

impl<'de> Deserialize<'de> for RsvpStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.to_ascii_lowercase().as_str() {
            "attending" => Ok(RsvpStatus::Attending),
            "unsure" | "maybe" => Ok(RsvpStatus::Maybe),
            "declined" => Ok(RsvpStatus::Declined),
            "noreply" | "not_replied" => Ok(RsvpStatus::NotReplied),
            other => Err(serde::de::Error::custom(format!("unknown rsvp status `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<Reference>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub privacy: Option<Privacy>,
    #[serde(default, deserialize_with = "graph_time")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "graph_time")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// An event the user was invited to, as listed under `{user}/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(rename = "id")]
    pub event_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "graph_time")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "graph_time")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    pub rsvp_status: RsvpStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInvitee {
    pub id: String,
    pub name: String,
    pub rsvp_status: RsvpStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<Reference>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub privacy: Option<Privacy>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMemberReference {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub administrator: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// A page, also used as the place of a checkin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub checkins: Option<u64>,
}

/// A page the current user administers, with the page's own access token.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    #[serde(default)]
    pub from: Option<Reference>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// `everyone`, `friends`, `friends-of-friends`, `networks` or `custom`.
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub count: u32,
    #[serde(default, rename = "type")]
    pub album_type: Option<String>,
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default, deserialize_with = "graph_time")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// One rendition of a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub source: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub from: Option<Reference>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Renditions, largest first as Graph lists them.
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default, deserialize_with = "data_list")]
    pub tags: Vec<Reference>,
    #[serde(default, deserialize_with = "graph_time")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub from: Option<Reference>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub embed_html: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "data_list")]
    pub tags: Vec<Reference>,
    #[serde(default, deserialize_with = "graph_time")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkin {
    pub id: String,
    #[serde(default)]
    pub place: Option<Page>,
    #[serde(default)]
    pub from: Option<Reference>,
    #[serde(default, deserialize_with = "data_list")]
    pub tags: Vec<Reference>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub application: Option<Reference>,
    #[serde(default, deserialize_with = "graph_time")]
    pub created_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub from: Option<Reference>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default, rename = "type")]
    pub post_type: Option<String>,
    #[serde(default, deserialize_with = "graph_time")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "graph_time")]
    pub updated_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub from: Option<Reference>,
    pub message: String,
    #[serde(default, deserialize_with = "graph_time")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "like_count")]
    pub likes: u32,
}

/// A link to share on a feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacebookLink {
    pub link: String,
    pub name: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
}

impl FacebookLink {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Size of a profile, event or group picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageType {
    Small,
    #[default]
    Normal,
    Large,
    Square,
}

impl ImageType {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Small => "small",
            ImageType::Normal => "normal",
            ImageType::Large => "large",
            ImageType::Square => "square",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rsvp_aliases() {
        let parse = |s: &str| serde_json::from_value::<RsvpStatus>(json!(s)).unwrap();
        assert_eq!(parse("attending"), RsvpStatus::Attending);
        assert_eq!(parse("unsure"), RsvpStatus::Maybe);
        assert_eq!(parse("declined"), RsvpStatus::Declined);
        assert_eq!(parse("noreply"), RsvpStatus::NotReplied);
        assert_eq!(parse("not_replied"), RsvpStatus::NotReplied);
        assert!(serde_json::from_value::<RsvpStatus>(json!("later")).is_err());
    }

    #[test]
    fn privacy_is_case_insensitive() {
        let p: Privacy = serde_json::from_value(json!("SECRET")).unwrap();
        assert_eq!(p, Privacy::Secret);
        let p: Privacy = serde_json::from_value(json!("Open")).unwrap();
        assert_eq!(p, Privacy::Open);
    }

    #[test]
    fn checkin_tags_unwrap_data() {
        let c: Checkin = serde_json::from_value(json!({
            "id": "10150431253050580",
            "tags": {"data": [{"id": "738140579", "name": "Craig Walls"}]},
            "created_time": "2011-03-13T01:57:11+0000"
        }))
        .unwrap();
        assert_eq!(c.tags.len(), 1);
        assert_eq!(c.tags[0].name.as_deref(), Some("Craig Walls"));
        assert!(c.created_time.is_some());
        assert!(c.place.is_none());
    }

    #[test]
    fn comment_likes_accept_both_shapes() {
        let a: Comment =
            serde_json::from_value(json!({"id": "1", "message": "m", "likes": 4})).unwrap();
        assert_eq!(a.likes, 4);
        let b: Comment =
            serde_json::from_value(json!({"id": "1", "message": "m", "likes": {"count": 2}}))
                .unwrap();
        assert_eq!(b.likes, 2);
        let c: Comment = serde_json::from_value(json!({"id": "1", "message": "m"})).unwrap();
        assert_eq!(c.likes, 0);
    }

    #[test]
    fn bad_times_are_dropped() {
        let e: Event = serde_json::from_value(json!({
            "id": "1", "name": "n", "start_time": "someday", "privacy": "OPEN"
        }))
        .unwrap();
        assert_eq!(e.start_time, None);
        assert_eq!(e.privacy, Some(Privacy::Open));
    }

    #[test]
    fn account_tokens_stay_out_of_debug_output() {
        let account: Account = serde_json::from_value(json!({
            "id": "987654321", "name": "Test Page", "access_token": "pageAccessToken"
        }))
        .unwrap();
        let shown = format!("{account:?}");
        assert!(shown.contains("Test Page"));
        assert!(!shown.contains("pageAccessToken"));
    }

    #[test]
    fn image_types_render_lowercase() {
        assert_eq!(ImageType::Large.to_string(), "large");
        assert_eq!(ImageType::default(), ImageType::Normal);
    }
}
