//! Unit tests for configuration use-cases.

#![allow(clippy::unwrap_used)]

use agentic_cli::application::ports::ConfigStore;
use agentic_cli::application::services::config_service::{load_config, resolve_api_url, set_value};
use agentic_cli::domain::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

use crate::helpers::MemoryConfigStore;

#[test]
fn test_missing_config_loads_defaults() {
    let config = load_config(&MemoryConfigStore::default()).unwrap();
    assert_eq!(config.api.url, DEFAULT_API_URL);
    assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_set_value_persists_valid_settings() {
    let store = MemoryConfigStore::default();

    set_value(&store, "api.url", "https://agents.example.com/").unwrap();
    let config = set_value(&store, "api.timeout_secs", "90").unwrap();

    assert_eq!(config.api.url, "https://agents.example.com");
    assert_eq!(config.api.timeout_secs, 90);
    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn test_set_value_rejects_and_writes_nothing() {
    let store = MemoryConfigStore::default();

    assert!(set_value(&store, "security.level", "strict").is_err());
    assert!(set_value(&store, "api.timeout_secs", "0").is_err());
    assert!(set_value(&store, "api.url", "ftp://nope").is_err());

    assert!(store.config.lock().unwrap().is_none());
}

#[test]
fn test_api_url_precedence() {
    let store = MemoryConfigStore::default();
    let config = set_value(&store, "api.url", "https://from-config.example.com").unwrap();

    assert_eq!(resolve_api_url(&config, None), "https://from-config.example.com");
    assert_eq!(
        resolve_api_url(&config, Some("http://127.0.0.1:9000/")),
        "http://127.0.0.1:9000"
    );
    assert_eq!(resolve_api_url(&config, Some("  ")), "https://from-config.example.com");
}
