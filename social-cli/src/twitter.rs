use clap::{Subcommand, ValueEnum};
use color_eyre::eyre::{Result, bail};
use serde_json::json;
use social_api::twitter::{DEFAULT_RESULTS_PER_PAGE, StatusDetails, TwitterTemplate};

use crate::emit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimelineKind {
    Public,
    Home,
    Friends,
    User,
    Mentions,
}

#[derive(Subcommand, Debug)]
pub enum TwitterCommand {
    /// Show a profile; the authenticated user's when no selector is given.
    Profile {
        #[arg(long, conflicts_with = "user_id")]
        screen_name: Option<String>,
        #[arg(long)]
        user_id: Option<u64>,
    },
    /// Show a timeline.
    Timeline {
        #[arg(long, value_enum, default_value_t = TimelineKind::Home)]
        kind: TimelineKind,
        /// Another user's timeline (implies `--kind user`).
        #[arg(long)]
        screen_name: Option<String>,
    },
    /// Search tweets. Works without credentials.
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_RESULTS_PER_PAGE)]
        per_page: u32,
        #[arg(long, default_value_t = 0)]
        since_id: u64,
        #[arg(long, default_value_t = 0)]
        max_id: u64,
    },
    /// Post a status update.
    Tweet {
        message: String,
        #[arg(long, requires = "longitude", allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, requires = "latitude", allow_hyphen_values = true)]
        longitude: Option<f64>,
        #[arg(long)]
        in_reply_to: Option<u64>,
    },
    Retweet { id: u64 },
    /// Screen names the user follows.
    Friends { screen_name: String },
    /// Screen names following the user.
    Followers { screen_name: String },
    Follow { screen_name: String },
    Unfollow { screen_name: String },
    /// Direct messages received by the authenticated user.
    Messages,
    SendMessage {
        #[arg(long)]
        to: String,
        text: String,
    },
    /// A user's lists.
    Lists { screen_name: String },
}

fn details(
    latitude: Option<f64>,
    longitude: Option<f64>,
    in_reply_to: Option<u64>,
) -> StatusDetails {
    let mut details = StatusDetails::default();
    if let (Some(lat), Some(long)) = (latitude, longitude) {
        details = details.with_location(lat, long);
    }
    if let Some(id) = in_reply_to {
        details = details.in_reply_to(id);
    }
    details
}

pub async fn run(twitter: &TwitterTemplate, cmd: TwitterCommand) -> Result<()> {
    tracing::debug!(?cmd, authorized = twitter.is_authorized(), "social.twitter.command");
    match cmd {
        TwitterCommand::Profile {
            screen_name,
            user_id,
        } => {
            let users = twitter.user_operations();
            let profile = match (screen_name, user_id) {
                (Some(name), _) => users.get_user_profile_by_screen_name(&name).await?,
                (None, Some(id)) => users.get_user_profile_by_id(id).await?,
                (None, None) => users.get_user_profile().await?,
            };
            emit(&profile)
        }
        TwitterCommand::Timeline { kind, screen_name } => {
            let timelines = twitter.timeline_operations();
            let tweets = match (kind, screen_name) {
                (_, Some(name)) => timelines.get_user_timeline_for_screen_name(&name).await?,
                (TimelineKind::Public, None) => timelines.get_public_timeline().await?,
                (TimelineKind::Home, None) => timelines.get_home_timeline().await?,
                (TimelineKind::Friends, None) => timelines.get_friends_timeline().await?,
                (TimelineKind::User, None) => timelines.get_user_timeline().await?,
                (TimelineKind::Mentions, None) => timelines.get_mentions().await?,
            };
            emit(&tweets)
        }
        TwitterCommand::Search {
            query,
            page,
            per_page,
            since_id,
            max_id,
        } => {
            if per_page == 0 {
                bail!("--per-page must be at least 1");
            }
            let results = twitter
                .search_operations()
                .search_range(&query, page, per_page, since_id, max_id)
                .await?;
            emit(&results)
        }
        TwitterCommand::Tweet {
            message,
            latitude,
            longitude,
            in_reply_to,
        } => {
            let details = details(latitude, longitude, in_reply_to);
            twitter
                .timeline_operations()
                .update_status_with_details(&message, &details)
                .await?;
            emit(&json!({ "posted": true }))
        }
        TwitterCommand::Retweet { id } => {
            twitter.timeline_operations().retweet(id).await?;
            emit(&json!({ "retweeted": id }))
        }
        TwitterCommand::Friends { screen_name } => {
            emit(&twitter.friend_operations().get_friends(&screen_name).await?)
        }
        TwitterCommand::Followers { screen_name } => {
            emit(&twitter.friend_operations().get_followers(&screen_name).await?)
        }
        TwitterCommand::Follow { screen_name } => {
            let followed = twitter.friend_operations().follow(&screen_name).await?;
            emit(&json!({ "followed": followed }))
        }
        TwitterCommand::Unfollow { screen_name } => {
            let unfollowed = twitter.friend_operations().unfollow(&screen_name).await?;
            emit(&json!({ "unfollowed": unfollowed }))
        }
        TwitterCommand::Messages => emit(
            &twitter
                .direct_message_operations()
                .get_direct_messages_received()
                .await?,
        ),
        TwitterCommand::SendMessage { to, text } => {
            let dms = twitter.direct_message_operations();
            match to.parse::<u64>() {
                Ok(user_id) => dms.send_direct_message_to_user_id(user_id, &text).await?,
                Err(_) => dms.send_direct_message_to_screen_name(&to, &text).await?,
            }
            emit(&json!({ "sent": true }))
        }
        TwitterCommand::Lists { screen_name } => {
            emit(&twitter.list_operations().get_lists(&screen_name).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_need_both_coordinates() {
        assert_eq!(details(Some(1.0), None, None), StatusDetails::default());
        let d = details(Some(123.1), Some(-111.2), Some(7));
        assert_eq!(d.location, Some((123.1, -111.2)));
        assert_eq!(d.in_reply_to_status_id, Some(7));
    }
}
