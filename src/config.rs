//! Runtime configuration.
//!
//! Defaults point at a backend on localhost. Each field can be overridden
//! through an environment variable:
//!
//! - `NEWS_RACE_API_BASE`:     backend base URL
//! - `NEWS_RACE_QUERY`:        query used when the search field is blank
//! - `NEWS_RACE_DISPLAY`:      number of articles requested
//! - `NEWS_RACE_TIMEOUT_SECS`: request timeout

use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_QUERY: &str = "게섰거라";
pub const DEFAULT_DISPLAY: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: invalid URL {value:?}: {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("{var}: expected a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaceConfig {
    /// Backend base URL, always ending in `/`.
    pub api_base: String,
    pub default_query: String,
    pub display: u32,
    pub timeout: Duration,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            display: DEFAULT_DISPLAY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RaceConfig {
    /// Defaults overlaid with the `NEWS_RACE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RaceConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = get("NEWS_RACE_API_BASE") {
            let base = parse_base(&value).map_err(|source| ConfigError::InvalidUrl {
                var: "NEWS_RACE_API_BASE",
                value: value.clone(),
                source,
            })?;
            config.api_base = base.to_string();
        }
        if let Some(value) = get("NEWS_RACE_QUERY") {
            config.default_query = value.trim().to_string();
        }
        if let Some(value) = get("NEWS_RACE_DISPLAY") {
            config.display = parse_positive("NEWS_RACE_DISPLAY", &value)? as u32;
        }
        if let Some(value) = get("NEWS_RACE_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_positive("NEWS_RACE_TIMEOUT_SECS", &value)?);
        }
        Ok(config)
    }
}

/// Parse a base URL, forcing a trailing slash so `join` appends rather than
/// replaces the last path segment.
fn parse_base(value: &str) -> Result<Url, url::ParseError> {
    let value = value.trim();
    if value.ends_with('/') {
        Url::parse(value)
    } else {
        Url::parse(&format!("{}/", value))
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n as u64),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}
