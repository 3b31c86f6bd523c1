//! Tests for config functionality.

use crate::config::Config;
use crate::config::types::DEFAULT_CONFIG_FILE;
use crate::error::InfraError;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.model, "gemini-2.5-flash");
    assert_eq!(config.max_output_tokens, 8192);
    assert_eq!(config.timeout_secs, 120);
    assert_eq!(config.output_dir, PathBuf::from("output"));
    assert!(config.api_key.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_empty_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.model, "gemini-2.5-flash");
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
model: gemini-2.5-pro
output_dir: ./generated
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.model, "gemini-2.5-pro");
    assert_eq!(config.output_dir, PathBuf::from("./generated"));
    assert_eq!(config.max_output_tokens, 8192);
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = "model: gemini-2.5-flash\nfuture_option: true\n";
    assert!(Config::from_yaml(yaml).is_ok());
}

#[test]
fn test_api_key_is_never_read_from_yaml() {
    let config = Config::from_yaml("api_key: from-file\n").unwrap();
    assert!(config.api_key.is_none());
}

#[test]
fn test_invalid_yaml_is_config_error() {
    let err = Config::from_yaml("model: [unclosed").unwrap_err();
    assert!(matches!(err, InfraError::Config(_)));
}

#[test]
fn test_env_overrides_file_values() {
    let config = Config::from_yaml("model: from-file\ntimeout_secs: 30\n")
        .unwrap()
        .with_env(env_of(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "from-env"),
            ("GEMINI_MAX_TOKENS", "2048"),
            ("OUTPUT_DIR", "/tmp/out"),
        ]))
        .unwrap();

    assert_eq!(config.api_key.as_deref(), Some("secret"));
    assert_eq!(config.model, "from-env");
    assert_eq!(config.max_output_tokens, 2048);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
}

#[test]
fn test_empty_env_values_are_unset() {
    let config = Config::default()
        .with_env(env_of(&[("GEMINI_API_KEY", "  "), ("GEMINI_MODEL", "")]))
        .unwrap();

    assert!(config.api_key.is_none());
    assert_eq!(config.model, "gemini-2.5-flash");
}

#[test]
fn test_unparseable_env_value_is_config_error() {
    let err = Config::default()
        .with_env(env_of(&[("GEMINI_MAX_TOKENS", "lots")]))
        .unwrap_err();
    assert!(err.to_string().contains("GEMINI_MAX_TOKENS"));
}

#[test]
fn test_require_api_key() {
    let config = Config::default();
    assert!(matches!(
        config.require_api_key(),
        Err(InfraError::MissingApiKey)
    ));

    let config = Config::default()
        .with_env(env_of(&[("GEMINI_API_KEY", "abc123")]))
        .unwrap();
    assert_eq!(config.require_api_key().unwrap(), "abc123");
}

#[test]
fn test_validate_rejects_zero_values() {
    let config = Config {
        max_output_tokens: 0,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        timeout_secs: 0,
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_out_of_range_temperature() {
    let config = Config {
        temperature: 2.5,
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("temperature"));
}

#[test]
fn test_validate_rejects_empty_model() {
    let config = Config {
        model: " ".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_debug_redacts_api_key() {
    let config = Config::default()
        .with_env(env_of(&[("GEMINI_API_KEY", "super-secret")]))
        .unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("***"));
}

#[test]
fn test_discover_uses_file_in_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "model: local-model\n").unwrap();

    let config = Config::discover(None, dir.path()).unwrap();
    assert_eq!(config.model, "local-model");
}

#[test]
fn test_discover_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::discover(None, dir.path()).unwrap();
    assert_eq!(config.model, "gemini-2.5-flash");
}

#[test]
fn test_discover_explicit_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");
    let err = Config::discover(Some(&missing), dir.path()).unwrap_err();
    assert!(matches!(err, InfraError::Config(_)));
}
