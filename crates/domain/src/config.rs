//! Client configuration structures
//!
//! Defaults point at the production Help Scout endpoints. Durations are kept
//! as plain integers so the structures load unchanged from JSON or TOML.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONNECT_TIMEOUT, HELPSCOUT_API_ENDPOINT, HELPSCOUT_AUTH_ENDPOINT, MAX_AUTH_CYCLES,
    MAX_RATE_LIMIT_RETRIES, RATE_LIMIT_DELAY, REQUEST_TIMEOUT, TOKEN_REFRESH_MARGIN,
};
use crate::errors::{HelpScoutError, Result};

/// Bounds of the rate-limit and re-authorization retry loops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after a 429 before giving up, per token.
    pub max_rate_limit_retries: u32,
    /// Full token/call cycles before a persistent 401 is terminal.
    pub max_auth_cycles: u32,
    /// Pause before retrying a rate-limited request, in milliseconds.
    pub rate_limit_delay_ms: u64,
}

impl RetryPolicy {
    /// Rate-limit pause as a [`Duration`].
    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: MAX_RATE_LIMIT_RETRIES,
            max_auth_cycles: MAX_AUTH_CYCLES,
            rate_limit_delay_ms: RATE_LIMIT_DELAY.as_millis() as u64,
        }
    }
}

/// Settings of one API client: credentials, endpoints, timeouts and
/// retry bounds.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// OAuth application id (`client_id`).
    pub app_id: String,
    /// OAuth application secret (`client_secret`).
    pub app_key: String,
    pub api_base_url: String,
    pub auth_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// A cached token is refreshed once it expires within this many seconds.
    pub token_refresh_margin_secs: u64,
    /// `User-Agent` header sent with every request; reqwest default when unset.
    pub user_agent: Option<String>,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Default configuration with the given credentials.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self { app_id: app_id.into(), app_key: app_key.into(), ..Self::default() }
    }

    /// TCP connect deadline.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Overall deadline of a single request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// See [`ClientConfig::token_refresh_margin_secs`].
    pub fn token_refresh_margin(&self) -> Duration {
        Duration::from_secs(self.token_refresh_margin_secs)
    }

    /// Check the values a client cannot work without.
    ///
    /// # Errors
    ///
    /// Returns `HelpScoutError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(HelpScoutError::Config("app_id must not be empty".into()));
        }
        if self.app_key.trim().is_empty() {
            return Err(HelpScoutError::Config("app_key must not be empty".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(HelpScoutError::Config("api_base_url must not be empty".into()));
        }
        if self.auth_url.trim().is_empty() {
            return Err(HelpScoutError::Config("auth_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(HelpScoutError::Config("request_timeout_secs must be positive".into()));
        }
        if self.retry.max_auth_cycles == 0 {
            return Err(HelpScoutError::Config("retry.max_auth_cycles must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_key: String::new(),
            api_base_url: HELPSCOUT_API_ENDPOINT.to_string(),
            auth_url: HELPSCOUT_AUTH_ENDPOINT.to_string(),
            connect_timeout_secs: CONNECT_TIMEOUT.as_secs(),
            request_timeout_secs: REQUEST_TIMEOUT.as_secs(),
            token_refresh_margin_secs: TOKEN_REFRESH_MARGIN.as_secs(),
            user_agent: None,
            retry: RetryPolicy::default(),
        }
    }
}

// app_key stays out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("auth_url", &self.auth_url)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("token_refresh_margin_secs", &self.token_refresh_margin_secs)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish()
    }
}
