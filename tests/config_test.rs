//! Integration tests for loading and saving the config file.

mod common;

use quill::config::{API_KEY_ENV_VAR, CONFIG_PATH_ENV_VAR, DEFAULT_MODEL};
use quill::{Config, ConfigError};
use serial_test::serial;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = common::temp_test_dir();
    let config = Config::load_from(&dir.path().join("absent.json")).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = common::temp_test_dir();
    let path = dir.path().join("nested/quill/config.json");

    let mut config = Config::default();
    config.set("model", "gemini-2.0-flash").unwrap();
    config.set("includeBody", "true").unwrap();
    config.set("extraInstructions", "Mention the ticket").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_saved_file_uses_camel_case_keys() {
    let dir = common::temp_test_dir();
    let path = dir.path().join("config.json");

    Config::default().save_to(&path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();

    assert!(raw.contains("\"useConventionalFormat\": true"));
    assert!(raw.contains("\"maxMessageLength\": 72"));
    assert!(!raw.contains("apiKey"));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = common::temp_test_dir();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_zero_length_in_file_is_invalid() {
    let dir = common::temp_test_dir();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"maxMessageLength": 0}"#).unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
#[serial]
fn test_config_path_env_override() {
    let dir = common::temp_test_dir();
    let path = dir.path().join("custom.json");
    std::fs::write(&path, r#"{"model": "gemini-custom"}"#).unwrap();

    temp_env::with_var(CONFIG_PATH_ENV_VAR, Some(&path), || {
        assert_eq!(Config::path().unwrap(), path);
        let config = Config::load().unwrap();
        assert_eq!(config.model, "gemini-custom");
    });
}

#[test]
#[serial]
fn test_env_api_key_takes_precedence() {
    let config = Config {
        api_key: Some("from-file".to_string()),
        ..Config::default()
    };

    temp_env::with_var(API_KEY_ENV_VAR, Some("from-env"), || {
        assert_eq!(config.api_key().unwrap(), "from-env");
    });
    temp_env::with_var_unset(API_KEY_ENV_VAR, || {
        assert_eq!(config.api_key().unwrap(), "from-file");
    });
}

#[test]
#[serial]
fn test_missing_api_key() {
    temp_env::with_var_unset(API_KEY_ENV_VAR, || {
        let config = Config::default();
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));

        let blank = Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(matches!(blank.api_key(), Err(ConfigError::MissingApiKey)));
    });
}

#[test]
fn test_unknown_fields_are_ignored() {
    let dir = common::temp_test_dir();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"theme": "dark", "autoPush": true}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.auto_push);
    assert_eq!(config.model, DEFAULT_MODEL);
}
