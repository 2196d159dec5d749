use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterProfile {
    pub id: u64,
    pub screen_name: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}

/// A tweet as seen in timelines, search results and list statuses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tweet {
    pub id: u64,
    pub text: String,
    pub from_user: String,
    pub from_user_id: u64,
    pub to_user_id: Option<u64>,
    pub profile_image_url: Option<String>,
    pub source: Option<String>,
    /// Only populated for search results.
    pub language_code: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectMessage {
    pub id: u64,
    pub text: String,
    pub sender_id: u64,
    pub sender_screen_name: String,
    pub recipient_id: u64,
    pub recipient_screen_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub tweets: Vec<Tweet>,
    pub max_id: u64,
    pub since_id: u64,
    pub last_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserList {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub slug: String,
    pub uri: Option<String>,
    pub description: Option<String>,
    pub public: bool,
    pub member_count: u32,
    pub subscriber_count: u32,
}

/// Optional extras for a status update.
///
/// ```
/// use social_api::twitter::StatusDetails;
///
/// let details = StatusDetails::default()
///     .with_location(123.1, -111.2)
///     .in_reply_to(12345);
/// let params = details.to_parameters();
/// assert_eq!(params[0], ("lat", "123.1".into()));
/// assert_eq!(params[2], ("in_reply_to_status_id", "12345".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusDetails {
    pub location: Option<(f64, f64)>,
    pub in_reply_to_status_id: Option<u64>,
    pub display_coordinates: bool,
}

impl StatusDetails {
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    pub fn in_reply_to(mut self, status_id: u64) -> Self {
        self.in_reply_to_status_id = Some(status_id);
        self
    }

    pub fn display_coordinates(mut self, display: bool) -> Self {
        self.display_coordinates = display;
        self
    }

    /// Form parameters in the order they are sent.
    pub fn to_parameters(&self) -> Vec<(&'static str, Cow<'static, str>)> {
        let mut params = Vec::new();
        if let Some((lat, long)) = self.location {
            params.push(("lat", format!("{lat:?}").into()));
            params.push(("long", format!("{long:?}").into()));
        }
        if let Some(id) = self.in_reply_to_status_id {
            params.push(("in_reply_to_status_id", id.to_string().into()));
        }
        if self.display_coordinates {
            params.push(("display_coordinates", "true".into()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_details_add_nothing() {
        assert!(StatusDetails::default().to_parameters().is_empty());
    }

    #[test]
    fn coordinates_flag_is_explicit() {
        let params = StatusDetails::default()
            .with_location(1.5, 2.0)
            .display_coordinates(true)
            .to_parameters();
        let names: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, ["lat", "long", "display_coordinates"]);
        assert_eq!(params[0].1, "1.5");
        assert_eq!(params[1].1, "2.0");
    }
}
