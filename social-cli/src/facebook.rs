use clap::{Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use serde_json::json;
use social_api::facebook::{FacebookLink, FacebookTemplate};

use crate::emit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Rsvp {
    Invited,
    Attending,
    Maybe,
    Declined,
    Noreply,
}

#[derive(Subcommand, Debug)]
pub enum FacebookCommand {
    /// Show a profile; `me` when no id is given.
    Profile { id: Option<String> },
    /// Event invitations of the current (or given) user.
    Events {
        #[arg(long)]
        user: Option<String>,
    },
    Event { id: String },
    /// Invitees of an event, by RSVP status.
    Attendees {
        id: String,
        #[arg(long, value_enum, default_value_t = Rsvp::Attending)]
        rsvp: Rsvp,
    },
    Group { id: String },
    /// Members of a group.
    Members {
        id: String,
        /// Fetch full profiles instead of references.
        #[arg(long)]
        profiles: bool,
    },
    Checkins {
        #[arg(long)]
        object: Option<String>,
    },
    /// Check in at a place.
    Checkin {
        place: String,
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long)]
        message: Option<String>,
        /// Friend ids to tag; repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Posts on the current (or given) user's wall.
    Feed { id: Option<String> },
    /// Post a status message, optionally sharing a link.
    Post {
        message: String,
        #[arg(long)]
        link: Option<String>,
    },
    /// Photo albums of the current (or given) user.
    Albums { owner: Option<String> },
    /// Photos in an album.
    Photos { album: String },
    /// Show a page and whether the current user administers it.
    Page { id: String },
    SearchEvents { query: String },
    SearchGroups { query: String },
}

pub async fn run(facebook: &FacebookTemplate, cmd: FacebookCommand) -> Result<()> {
    tracing::debug!(?cmd, authorized = facebook.is_authorized(), "social.facebook.command");
    match cmd {
        FacebookCommand::Profile { id } => {
            let users = facebook.user_operations();
            let profile = match id {
                Some(id) => users.get_user_profile_for(&id).await?,
                None => users.get_user_profile().await?,
            };
            emit(&profile)
        }
        FacebookCommand::Events { user } => {
            let events = facebook.event_operations();
            let invitations = match user {
                Some(user) => events.get_invitations_for(&user).await?,
                None => events.get_invitations().await?,
            };
            emit(&invitations)
        }
        FacebookCommand::Event { id } => emit(&facebook.event_operations().get_event(&id).await?),
        FacebookCommand::Attendees { id, rsvp } => {
            let events = facebook.event_operations();
            let invitees = match rsvp {
                Rsvp::Invited => events.get_invited(&id).await?,
                Rsvp::Attending => events.get_attending(&id).await?,
                Rsvp::Maybe => events.get_maybe_attending(&id).await?,
                Rsvp::Declined => events.get_declined(&id).await?,
                Rsvp::Noreply => events.get_no_replies(&id).await?,
            };
            emit(&invitees)
        }
        FacebookCommand::Group { id } => emit(&facebook.group_operations().get_group(&id).await?),
        FacebookCommand::Members { id, profiles } => {
            let groups = facebook.group_operations();
            if profiles {
                emit(&groups.get_member_profiles(&id).await?)
            } else {
                emit(&groups.get_members(&id).await?)
            }
        }
        FacebookCommand::Checkins { object } => {
            let places = facebook.places_operations();
            let checkins = match object {
                Some(object) => places.get_checkins_for(&object).await?,
                None => places.get_checkins().await?,
            };
            emit(&checkins)
        }
        FacebookCommand::Checkin {
            place,
            latitude,
            longitude,
            message,
            tags,
        } => {
            let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
            let id = facebook
                .places_operations()
                .checkin_with_message(&place, latitude, longitude, message.as_deref(), &tags)
                .await?;
            emit(&json!({ "id": id }))
        }
        FacebookCommand::Feed { id } => {
            let feed = facebook.feed_operations();
            let posts = match id {
                Some(id) => feed.get_feed_for(&id).await?,
                None => feed.get_feed().await?,
            };
            emit(&posts)
        }
        FacebookCommand::Post { message, link } => {
            let feed = facebook.feed_operations();
            let id = match link {
                Some(link) => feed.post_link(&message, &FacebookLink::new(link)).await?,
                None => feed.update_status(&message).await?,
            };
            emit(&json!({ "id": id }))
        }
        FacebookCommand::Albums { owner } => {
            let media = facebook.media_operations();
            let albums = match owner {
                Some(owner) => media.get_albums_for(&owner).await?,
                None => media.get_albums().await?,
            };
            emit(&albums)
        }
        FacebookCommand::Photos { album } => {
            emit(&facebook.media_operations().get_photos(&album).await?)
        }
        FacebookCommand::Page { id } => {
            let pages = facebook.page_operations();
            let page = pages.get_page(&id).await?;
            let admin = pages.is_page_admin(&id).await?;
            emit(&json!({ "page": page, "admin": admin }))
        }
        FacebookCommand::SearchEvents { query } => {
            emit(&facebook.event_operations().search(&query).await?)
        }
        FacebookCommand::SearchGroups { query } => {
            emit(&facebook.group_operations().search(&query).await?)
        }
    }
}
