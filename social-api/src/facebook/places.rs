use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::graph::{GraphClient, Params};
use super::types::Checkin;

/// Facebook Places checkins.
#[async_trait]
pub trait PlacesOperations: Send + Sync {
    async fn get_checkins(&self) -> Result<Vec<Checkin>>;

    async fn get_checkins_for(&self, object_id: &str) -> Result<Vec<Checkin>>;

    async fn get_checkin(&self, checkin_id: &str) -> Result<Checkin>;

    /// Check the current user in at a place. Returns the checkin id.
    async fn checkin(&self, place_id: &str, latitude: f64, longitude: f64) -> Result<String>;

    /// Like [`PlacesOperations::checkin`], with an optional message and the
    /// ids of friends to tag.
    async fn checkin_with_message(
        &self,
        place_id: &str,
        latitude: f64,
        longitude: f64,
        message: Option<&str>,
        tags: &[&str],
    ) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct PlacesTemplate {
    graph: Arc<GraphClient>,
}

impl PlacesTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

fn checkin_form<'a>(
    place_id: &'a str,
    latitude: f64,
    longitude: f64,
    message: Option<&'a str>,
    tags: &[&str],
) -> Params<'a> {
    // `{:?}` keeps the decimal point on whole degrees (`40.0`, not `40`).
    let coordinates = format!(r#"{{"latitude":"{latitude:?}","longitude":"{longitude:?}"}}"#);
    let mut form: Params<'a> = vec![("place", place_id.into()), ("coordinates", coordinates.into())];
    if let Some(message) = message {
        form.push(("message", message.into()));
    }
    if !tags.is_empty() {
        form.push(("tags", tags.join(",").into()));
    }
    form
}

#[async_trait]
impl PlacesOperations for PlacesTemplate {
    async fn get_checkins(&self) -> Result<Vec<Checkin>> {
        self.get_checkins_for("me").await
    }

    async fn get_checkins_for(&self, object_id: &str) -> Result<Vec<Checkin>> {
        self.graph
            .fetch_connections(object_id, "checkins", Vec::new())
            .await
    }

    async fn get_checkin(&self, checkin_id: &str) -> Result<Checkin> {
        self.graph.fetch_object(checkin_id, Vec::new()).await
    }

    async fn checkin(&self, place_id: &str, latitude: f64, longitude: f64) -> Result<String> {
        self.checkin_with_message(place_id, latitude, longitude, None, &[])
            .await
    }

    async fn checkin_with_message(
        &self,
        place_id: &str,
        latitude: f64,
        longitude: f64,
        message: Option<&str>,
        tags: &[&str],
    ) -> Result<String> {
        let form = checkin_form(place_id, latitude, longitude, message, tags);
        self.graph.publish("me", "checkins", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_checkin_form() {
        let form = checkin_form("123456789", 111.111, 222.222, None, &[]);
        assert_eq!(form.len(), 2);
        assert_eq!(form[0], ("place", "123456789".into()));
        assert_eq!(
            form[1],
            ("coordinates", r#"{"latitude":"111.111","longitude":"222.222"}"#.into())
        );
    }

    #[test]
    fn message_and_tags_are_appended() {
        let form = checkin_form("123456789", 1.5, -2.0, Some("Hello"), &["24680", "13579"]);
        let names: Vec<_> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, ["place", "coordinates", "message", "tags"]);
        assert_eq!(form[1].1, r#"{"latitude":"1.5","longitude":"-2.0"}"#);
        assert_eq!(form[3].1, "24680,13579");
    }

    #[test]
    fn whole_degrees_keep_their_decimal() {
        let form = checkin_form("123456789", 40.0, -2.0, None, &[]);
        assert_eq!(form[1].1, r#"{"latitude":"40.0","longitude":"-2.0"}"#);
    }
}
