use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::graph::GraphClient;
use super::types::{Event, EventInvitee, ImageType, Invitation};

/// Events, invitations and RSVPs.
#[async_trait]
pub trait EventOperations: Send + Sync {
    /// Events the current user has been invited to.
    async fn get_invitations(&self) -> Result<Vec<Invitation>>;

    async fn get_invitations_for(&self, user_id: &str) -> Result<Vec<Invitation>>;

    async fn get_event(&self, event_id: &str) -> Result<Event>;

    async fn get_event_image(&self, event_id: &str) -> Result<Vec<u8>>;

    async fn get_event_image_of_type(&self, event_id: &str, image_type: ImageType)
    -> Result<Vec<u8>>;

    /// Times are passed through as Graph accepts them (ISO-8601 or unix time).
    /// Returns the new event's id.
    async fn create_event(&self, name: &str, start_time: &str, end_time: &str) -> Result<String>;

    async fn delete_event(&self, event_id: &str) -> Result<()>;

    async fn get_invited(&self, event_id: &str) -> Result<Vec<EventInvitee>>;

    async fn get_attending(&self, event_id: &str) -> Result<Vec<EventInvitee>>;

    async fn get_maybe_attending(&self, event_id: &str) -> Result<Vec<EventInvitee>>;

    async fn get_no_replies(&self, event_id: &str) -> Result<Vec<EventInvitee>>;

    async fn get_declined(&self, event_id: &str) -> Result<Vec<EventInvitee>>;

    async fn accept_invitation(&self, event_id: &str) -> Result<()>;

    async fn maybe_invitation(&self, event_id: &str) -> Result<()>;

    async fn decline_invitation(&self, event_id: &str) -> Result<()>;

    async fn search(&self, query: &str) -> Result<Vec<Event>>;
}

#[derive(Debug, Clone)]
pub struct EventTemplate {
    graph: Arc<GraphClient>,
}

impl EventTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }

    async fn invitees(&self, event_id: &str, connection: &str) -> Result<Vec<EventInvitee>> {
        self.graph
            .fetch_connections(event_id, connection, Vec::new())
            .await
    }

    async fn rsvp(&self, event_id: &str, connection: &str) -> Result<()> {
        self.graph.post(event_id, connection, Vec::new()).await?;
        tracing::debug!(event_id, rsvp = connection, "facebook.event.rsvp");
        Ok(())
    }
}

#[async_trait]
impl EventOperations for EventTemplate {
    async fn get_invitations(&self) -> Result<Vec<Invitation>> {
        self.get_invitations_for("me").await
    }

    async fn get_invitations_for(&self, user_id: &str) -> Result<Vec<Invitation>> {
        self.graph
            .fetch_connections(user_id, "events", Vec::new())
            .await
    }

    async fn get_event(&self, event_id: &str) -> Result<Event> {
        self.graph.fetch_object(event_id, Vec::new()).await
    }

    async fn get_event_image(&self, event_id: &str) -> Result<Vec<u8>> {
        self.get_event_image_of_type(event_id, ImageType::Normal)
            .await
    }

    async fn get_event_image_of_type(
        &self,
        event_id: &str,
        image_type: ImageType,
    ) -> Result<Vec<u8>> {
        self.graph.fetch_image(event_id, "picture", image_type).await
    }

    async fn create_event(&self, name: &str, start_time: &str, end_time: &str) -> Result<String> {
        self.graph
            .publish(
                "me",
                "events",
                vec![
                    ("name", name.into()),
                    ("start_time", start_time.into()),
                    ("end_time", end_time.into()),
                ],
            )
            .await
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.graph.delete(event_id).await
    }

    async fn get_invited(&self, event_id: &str) -> Result<Vec<EventInvitee>> {
        self.invitees(event_id, "invited").await
    }

    async fn get_attending(&self, event_id: &str) -> Result<Vec<EventInvitee>> {
        self.invitees(event_id, "attending").await
    }

    async fn get_maybe_attending(&self, event_id: &str) -> Result<Vec<EventInvitee>> {
        self.invitees(event_id, "maybe").await
    }

    async fn get_no_replies(&self, event_id: &str) -> Result<Vec<EventInvitee>> {
        self.invitees(event_id, "noreply").await
    }

    async fn get_declined(&self, event_id: &str) -> Result<Vec<EventInvitee>> {
        self.invitees(event_id, "declined").await
    }

    async fn accept_invitation(&self, event_id: &str) -> Result<()> {
        self.rsvp(event_id, "attending").await
    }

    async fn maybe_invitation(&self, event_id: &str) -> Result<()> {
        self.rsvp(event_id, "maybe").await
    }

    async fn decline_invitation(&self, event_id: &str) -> Result<()> {
        self.rsvp(event_id, "declined").await
    }

    async fn search(&self, query: &str) -> Result<Vec<Event>> {
        self.graph.search(query, "event").await
    }
}
