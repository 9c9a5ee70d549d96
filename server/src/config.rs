//! Deployment configuration for the upstream demo API.
//!
//! Both values are required at startup; the proxy refuses to initialize
//! without them rather than failing per-request.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Environment variable naming the upstream base URL.
pub const UPSTREAM_URL_ENV: &str = "ROSTER_UPSTREAM_URL";
/// Environment variable holding the upstream secret key.
pub const API_KEY_ENV: &str = "ROSTER_API_KEY";

/// Upstream connection settings loaded from the environment.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the external API, without a trailing slash.
    pub base_url: String,
    /// Static secret sent as the `x-api-key` header on every forward.
    pub api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

impl UpstreamConfig {
    /// Load from `ROSTER_UPSTREAM_URL` and `ROSTER_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(UPSTREAM_URL_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        )
    }

    /// Build from raw values; empty strings count as missing.
    fn from_vars(base_url: Option<String>, api_key: Option<String>) -> Result<Self, ConfigError> {
        let base_url = base_url
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(UPSTREAM_URL_ENV))?;
        let api_key = api_key
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(API_KEY_ENV))?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_owned(), api_key })
    }
}
