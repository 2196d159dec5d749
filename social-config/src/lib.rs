//! Loader for `social.yaml` with environment overlays.
//!
//! Schema:
//!
//! ```yaml
//! version: "1"
//! providers:
//!   - id: twitter
//!     kind: twitter
//!     config:
//!       consumer_key: "${TWITTER_CONSUMER_KEY}"
//!       consumer_secret: "${TWITTER_CONSUMER_SECRET}"
//!       access_token: "${TWITTER_ACCESS_TOKEN}"
//!       access_token_secret: "${TWITTER_ACCESS_TOKEN_SECRET}"
//!   - id: facebook
//!     kind: facebook
//!     config:
//!       access_token: "${FACEBOOK_ACCESS_TOKEN}"
//! http:
//!   timeout_secs: 15
//!   max_retries: 0
//! logging:
//!   level: info
//!   format: text
//!   stderr: true
//! ```
//!
//! Precedence: files and inline YAML in the order they were added, then
//! `SOCIAL__*` environment variables (`SOCIAL__HTTP__TIMEOUT_SECS=30`).
//! `${VAR}` placeholders are expanded after merging, so they work in every
//! source. Unknown variables are left untouched.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// File name looked up in the working directory and the user config dir.
pub const DEFAULT_FILE_NAME: &str = "social.yaml";

#[derive(Debug, Deserialize)]
pub struct SocialConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub providers: Vec<ProviderSpec>,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl SocialConfig {
    /// First enabled provider of the given kind, or the one with `id` when given.
    pub fn provider(&self, kind: ProviderKind, id: Option<&str>) -> Option<&ProviderSpec> {
        self.providers
            .iter()
            .filter(|p| p.is_enabled() && p.details.kind() == kind)
            .find(|p| id.is_none_or(|id| p.id == id))
    }
}

/// Shared fields + the per-kind details.
#[derive(Debug, Deserialize)]
pub struct ProviderSpec {
    pub id: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub details: ProviderDetails,
}

impl ProviderSpec {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// The tag is `kind`; the payload lives in `config`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind")]
pub enum ProviderDetails {
    #[serde(rename = "twitter")]
    Twitter { config: TwitterConfig },

    #[serde(rename = "facebook")]
    Facebook { config: FacebookConfig },
}

impl ProviderDetails {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderDetails::Twitter { .. } => ProviderKind::Twitter,
            ProviderDetails::Facebook { .. } => ProviderKind::Facebook,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Twitter,
    Facebook,
}

/// Twitter application and (optionally) user credentials.
///
/// Without the access-token pair only anonymous operations (search, public
/// timelines, profile lookups) are available.
#[derive(Debug, Deserialize)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub access_token_secret: Option<String>,
    #[serde(default = "default_twitter_api_url")]
    pub api_url: String,
    #[serde(default = "default_twitter_search_url")]
    pub search_url: String,
}

#[derive(Debug, Deserialize)]
pub struct FacebookConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_graph_url")]
    pub graph_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_retries: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatSetting {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormatSetting,
    #[serde(default = "default_true")]
    pub stderr: bool,
    /// Enables the rolling file sink when set.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormatSetting::Text,
            stderr: true,
            dir: None,
        }
    }
}

fn default_twitter_api_url() -> String {
    "https://api.twitter.com/1/".into()
}
fn default_twitter_search_url() -> String {
    "https://search.twitter.com/".into()
}
fn default_graph_url() -> String {
    "https://graph.facebook.com/".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_log_level() -> String {
    "info".into()
}
fn default_true() -> bool {
    true
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Candidate config locations in lookup order: `./social.yaml`, then
/// `<config dir>/social/social.yaml`.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("social").join(DEFAULT_FILE_NAME));
    }
    paths
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct SocialConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    files: Vec<(PathBuf, bool)>,
    inline: Vec<String>,
}

impl Default for SocialConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialConfigLoader {
    /// Start empty; `SOCIAL__` env overrides are applied on top of whatever
    /// sources are added.
    ///
    /// ```
    /// use social_config::SocialConfigLoader;
    ///
    /// let config = SocialConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nproviders: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.providers.is_empty());
    /// assert_eq!(config.http.timeout_secs, 15);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            files: Vec::new(),
            inline: Vec::new(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), true));
        self
    }

    /// Attach a file that may be absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use social_config::{ProviderDetails, SocialConfigLoader};
    ///
    /// let cfg = SocialConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// providers:
    ///   - id: "fb"
    ///     kind: "facebook"
    ///     config:
    ///       access_token: "example"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.providers.len(), 1);
    /// match &cfg.providers[0].details {
    ///     ProviderDetails::Facebook { config } => {
    ///         assert_eq!(config.graph_url, "https://graph.facebook.com/");
    ///     }
    ///     _ => panic!("expected facebook"),
    /// }
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.inline.push(yaml.to_string());
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders and deserialize.
    pub fn load(self) -> Result<SocialConfig, ConfigError> {
        let mut builder = self.builder;
        for (path, required) in &self.files {
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }
        for yaml in &self.inline {
            builder = builder.add_source(File::from_str(yaml, config::FileFormat::Yaml));
        }
        builder = builder.add_source(
            Environment::with_prefix("SOCIAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

/// Parse a YAML document directly, without environment overlays.
pub fn from_yaml_str(yaml: &str) -> Result<SocialConfig, serde_yaml::Error> {
    let mut v: Value = serde_yaml::from_str(yaml)?;
    expand_env_in_value(&mut v);
    serde_json::from_value(v).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Plano")), ("STATE", Some("TX"))], || {
            let mut v = json!(["hello-$CITY", { "loc": "${CITY}, ${STATE}" }, 42, true, null]);
            expand_env_in_value(&mut v);
            assert_eq!(v, json!(["hello-Plano", { "loc": "Plano, TX" }, 42, true, null]));
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("FOO", Some("start-${BAR}-end")),
            ],
            || {
                let mut v = json!("X=${FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${SOCIAL_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${SOCIAL_DOES_NOT_EXIST}"));
    }

    #[test]
    fn twitter_defaults_fill_endpoints() {
        let cfg = from_yaml_str(
            r#"
providers:
  - id: tw
    kind: twitter
    config:
      consumer_key: ck
      consumer_secret: cs
"#,
        )
        .unwrap();
        match &cfg.providers[0].details {
            ProviderDetails::Twitter { config } => {
                assert_eq!(config.api_url, "https://api.twitter.com/1/");
                assert_eq!(config.search_url, "https://search.twitter.com/");
                assert!(config.access_token.is_none());
            }
            _ => panic!("expected twitter"),
        }
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.stderr);
    }

    #[test]
    fn provider_lookup_skips_disabled() {
        let cfg = from_yaml_str(
            r#"
providers:
  - id: old
    kind: facebook
    enabled: false
    config: {}
  - id: current
    kind: facebook
    config:
      access_token: t
  - id: tw
    kind: twitter
    config:
      consumer_key: ck
      consumer_secret: cs
"#,
        )
        .unwrap();
        assert_eq!(cfg.provider(ProviderKind::Facebook, None).unwrap().id, "current");
        assert!(cfg.provider(ProviderKind::Facebook, Some("old")).is_none());
        assert_eq!(cfg.provider(ProviderKind::Twitter, Some("tw")).unwrap().id, "tw");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = from_yaml_str(
            r#"
providers:
  - id: x
    kind: myspace
    config: {}
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("myspace"));
    }
}
