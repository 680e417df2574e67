//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AgenticConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<AgenticConfig> {
    store.load()
}

/// Validate, apply and persist one setting. Returns the updated config.
///
/// # Errors
///
/// Returns an error if the key or value is invalid or the file cannot be
/// written. Nothing is written on validation failure.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AgenticConfig> {
    let mut config = store.load()?;
    config.apply(key, value)?;
    store.save(&config)?;
    tracing::debug!(key, value, "config updated");
    Ok(config)
}

/// Base URL to talk to, by precedence: explicit override (flag or
/// `AGENTIC_API_URL`), then the config file.
#[must_use]
pub fn resolve_api_url(config: &AgenticConfig, override_url: Option<&str>) -> String {
    override_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(&config.api.url)
        .trim_end_matches('/')
        .to_string()
}
