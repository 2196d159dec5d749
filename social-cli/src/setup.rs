//! Config loading and template construction.

use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use social_api::facebook::FacebookTemplate;
use social_api::twitter::TwitterTemplate;
use social_common::observability::{LogConfig, LogFormat, LogSink};
use social_config::{
    LogFormatSetting, LoggingSettings, ProviderDetails, ProviderKind, SocialConfig,
    SocialConfigLoader, default_config_paths,
};
use social_http::OAuth1Credentials;

/// Explicit path must exist; otherwise the first default location found is
/// used, and with none present the config is built from env vars alone.
pub fn load_config(explicit: Option<&Path>) -> Result<SocialConfig> {
    let loader = match explicit {
        Some(path) => SocialConfigLoader::new().with_file(path),
        None => match default_config_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => SocialConfigLoader::new().with_optional_file(path),
            None => SocialConfigLoader::new(),
        },
    };
    loader.load().wrap_err("failed to load social config")
}

pub fn log_config(settings: &LoggingSettings) -> LogConfig {
    let sink = match (&settings.dir, settings.stderr) {
        (Some(_), true) => LogSink::Both,
        (Some(_), false) => LogSink::File,
        (None, _) => LogSink::Stderr,
    };
    LogConfig {
        log_dir: settings.dir.clone(),
        sink,
        format: match settings.format {
            LogFormatSetting::Text => LogFormat::Text,
            LogFormatSetting::Json => LogFormat::Json,
        },
        default_filter: settings.level.clone(),
        ..LogConfig::default()
    }
}

/// Blank values and unexpanded `${VAR}` placeholders count as unset.
fn configured(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.starts_with("${"))
}

pub fn twitter_template(cfg: &SocialConfig, id: Option<&str>) -> Result<TwitterTemplate> {
    let mut builder = TwitterTemplate::builder()
        .timeout(Duration::from_secs(cfg.http.timeout_secs))
        .retries(cfg.http.max_retries);

    if let Some(ProviderDetails::Twitter { config }) =
        cfg.provider(ProviderKind::Twitter, id).map(|p| &p.details)
    {
        builder = builder
            .api_url(config.api_url.as_str())
            .search_url(config.search_url.as_str());
        if let (Some(token), Some(secret)) = (
            configured(&config.access_token),
            configured(&config.access_token_secret),
        ) {
            builder = builder.credentials(OAuth1Credentials::new(
                config.consumer_key.as_str(),
                config.consumer_secret.as_str(),
                token,
                secret,
            ));
        }
    } else {
        tracing::info!("no twitter provider configured; using anonymous access");
    }
    Ok(builder.build()?)
}

pub fn facebook_template(cfg: &SocialConfig, id: Option<&str>) -> Result<FacebookTemplate> {
    let mut builder = FacebookTemplate::builder()
        .timeout(Duration::from_secs(cfg.http.timeout_secs))
        .retries(cfg.http.max_retries);

    if let Some(ProviderDetails::Facebook { config }) =
        cfg.provider(ProviderKind::Facebook, id).map(|p| &p.details)
    {
        builder = builder.graph_url(config.graph_url.as_str());
        if let Some(token) = configured(&config.access_token) {
            builder = builder.access_token(token);
        }
    } else {
        tracing::info!("no facebook provider configured; using anonymous access");
    }
    Ok(builder.build()?)
}
