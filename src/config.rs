use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://openexchangerates.org/api";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3600);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Unanchored: any string containing 32 alphanumerics in a row passes.
// Providers that change key length will be rejected here.
static APP_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-zA-Z0-9]{32}").expect("valid app_id pattern"));

/// Access key for the rates API. Only the shape is checked, not whether
/// the remote actually accepts it.
#[derive(Clone, PartialEq, Eq)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if !APP_ID_PATTERN.is_match(&id) {
            return Err(ConfigError::InvalidCredential);
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppId(***)")
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_id: AppId,
    pub api_base: Url,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Config {
    /// Reads `OXR_*` variables, loading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = lookup("OXR_APP_ID").ok_or(ConfigError::MissingVar("OXR_APP_ID"))?;
        let app_id = AppId::new(app_id)?;

        let api_base = lookup("OXR_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = match Url::parse(&api_base) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => {
                return Err(ConfigError::InvalidVar {
                    name: "OXR_API_BASE",
                    value: api_base,
                });
            }
        };

        let interval = seconds(&lookup, "OXR_INTERVAL_SECS")?.unwrap_or(DEFAULT_INTERVAL);
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        let timeout = seconds(&lookup, "OXR_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            app_id,
            api_base,
            interval,
            timeout,
        })
    }
}

fn seconds<F>(lookup: &F, name: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };

    value
        .trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| ConfigError::InvalidVar { name, value })
}
