//! `social`: command-line access to the Twitter and Facebook templates.
//!
//! - `social twitter ...` - profiles, timelines, search, tweets, friends, DMs, lists
//! - `social facebook ...` - profiles, events, groups, checkins, feed
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr (and to a
//! rolling file when `logging.dir` is configured).

mod facebook;
mod setup;
mod twitter;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use social_common::observability::init_logging;

/// Twitter and Facebook from the command line.
#[derive(Parser, Debug)]
#[command(name = "social")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file. Defaults to ./social.yaml, then the user config dir.
    #[arg(long, global = true, env = "SOCIAL_CONFIG")]
    config: Option<PathBuf>,

    /// Provider id to use when the config lists several of the same kind.
    #[arg(long, global = true)]
    provider: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Twitter REST API operations.
    #[command(subcommand)]
    Twitter(twitter::TwitterCommand),

    /// Facebook Graph API operations.
    #[command(subcommand)]
    Facebook(facebook::FacebookCommand),
}

/// Print a result as pretty JSON on stdout.
pub(crate) fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // 1) Load config (env wins)
    let cfg = setup::load_config(cli.config.as_deref())?;

    // 2) Logging from the `logging` section
    init_logging(setup::log_config(&cfg.logging)).map_err(|e| eyre!("{e:#}"))?;
    tracing::debug!(providers = cfg.providers.len(), "social.config.loaded");

    let provider = cli.provider.as_deref();
    match cli.command {
        Commands::Twitter(cmd) => {
            let template = setup::twitter_template(&cfg, provider)?;
            twitter::run(&template, cmd).await
        }
        Commands::Facebook(cmd) => {
            let template = setup::facebook_template(&cfg, provider)?;
            facebook::run(&template, cmd).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "social",
            "twitter",
            "search",
            "#rust",
            "--config",
            "other.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("other.yaml")));
        assert!(matches!(cli.command, Commands::Twitter(_)));
    }

    #[test]
    fn page_and_album_commands() {
        let cli = Cli::try_parse_from(["social", "facebook", "page", "140804655931206"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Facebook(facebook::FacebookCommand::Page { ref id }) if id == "140804655931206"
        ));
        let cli = Cli::try_parse_from(["social", "facebook", "albums"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Facebook(facebook::FacebookCommand::Albums { owner: None })
        ));
    }
}
