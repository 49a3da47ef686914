use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "https://api-venuo.mk0x.com";
pub const DEFAULT_LISTING_PATH: &str = "/#events";
const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub listing_path: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            listing_path: DEFAULT_LISTING_PATH.into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn with_api_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> Result<ClientSettings, ClientError> {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> Result<ClientSettings, ClientError> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw)?;
    }

    if let Ok(v) = std::env::var("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__LISTING_PATH") {
        settings.listing_path = v;
    }
    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    settings.api_base_url = normalize_api_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) -> Result<(), ClientError> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)
        .map_err(|err| ClientError::Config(format!("failed to parse {SETTINGS_FILE}: {err}")))?;

    if let Some(v) = file_cfg.get("api_base_url").and_then(|v| v.as_str()) {
        settings.api_base_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("listing_path").and_then(|v| v.as_str()) {
        settings.listing_path = v.to_string();
    }
    if let Some(v) = file_cfg.get("request_timeout_secs").and_then(|v| v.as_integer()) {
        settings.request_timeout_secs = u64::try_from(v).ok();
    }
    Ok(())
}

/// Trims whitespace and trailing slashes so endpoint paths can be appended
/// with a single `/`. Empty input falls back to the default host.
pub fn normalize_api_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_API_BASE_URL.to_string());
    }

    let parsed = Url::parse(trimmed)
        .map_err(|err| ClientError::Config(format!("invalid api base url '{trimmed}': {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::Config(format!(
            "api base url must be http(s), got '{}'",
            parsed.scheme()
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
