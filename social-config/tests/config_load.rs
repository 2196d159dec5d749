use social_config::{LogFormatSetting, ProviderDetails, ProviderKind, SocialConfigLoader};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

const FILE_YAML: &str = r#"
version: "1"
providers:
  - id: twitter
    kind: twitter
    config:
      consumer_key: "${TEST_TW_KEY}"
      consumer_secret: "${TEST_TW_SECRET}"
      access_token: "at"
      access_token_secret: "ats"
  - id: facebook
    kind: facebook
    config:
      access_token: "${TEST_FB_TOKEN}"
      graph_url: "http://localhost:9999/"
http:
  timeout_secs: 5
logging:
  format: json
  stderr: false
"#;

#[test]
#[serial]
fn loads_file_and_expands_placeholders() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "social.yaml", FILE_YAML);

    temp_env::with_vars(
        [
            ("TEST_TW_KEY", Some("key-from-env")),
            ("TEST_TW_SECRET", Some("secret-from-env")),
            ("TEST_FB_TOKEN", Some("fb-token")),
        ],
        || {
            let config = SocialConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load config");

            assert_eq!(config.providers.len(), 2);
            match &config.provider(ProviderKind::Twitter, None).unwrap().details {
                ProviderDetails::Twitter { config } => {
                    assert_eq!(config.consumer_key, "key-from-env");
                    assert_eq!(config.consumer_secret, "secret-from-env");
                    assert_eq!(config.access_token.as_deref(), Some("at"));
                }
                other => panic!("unexpected {other:?}"),
            }
            match &config.provider(ProviderKind::Facebook, None).unwrap().details {
                ProviderDetails::Facebook { config } => {
                    assert_eq!(config.access_token.as_deref(), Some("fb-token"));
                    assert_eq!(config.graph_url, "http://localhost:9999/");
                }
                other => panic!("unexpected {other:?}"),
            }
            assert_eq!(config.http.timeout_secs, 5);
            assert_eq!(config.http.max_retries, 0);
            assert_eq!(config.logging.format, LogFormatSetting::Json);
            assert!(!config.logging.stderr);
        },
    );
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "social.yaml", FILE_YAML);

    temp_env::with_vars(
        [
            ("SOCIAL__HTTP__TIMEOUT_SECS", Some("30")),
            ("SOCIAL__HTTP__MAX_RETRIES", Some("2")),
            ("SOCIAL__LOGGING__LEVEL", Some("debug")),
        ],
        || {
            let config = SocialConfigLoader::new().with_file(&p).load().unwrap();
            assert_eq!(config.http.timeout_secs, 30);
            assert_eq!(config.http.max_retries, 2);
            assert_eq!(config.logging.level, "debug");
        },
    );
}

#[test]
#[serial]
fn missing_optional_file_is_fine() {
    let tmp = TempDir::new().unwrap();
    let config = SocialConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .with_yaml_str("providers: []")
        .load()
        .unwrap();
    assert!(config.providers.is_empty());
}

#[test]
#[serial]
fn missing_required_file_fails() {
    let tmp = TempDir::new().unwrap();
    let result = SocialConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}
