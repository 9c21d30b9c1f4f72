//! OAuth client-credentials authentication
//!
//! [`Authenticator`] caches one bearer token and requests a new one from the
//! token endpoint when the cached token is missing, about to expire, or a
//! refresh is forced.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use helpscout_domain::constants::{CONTENT_TYPE_JSON, GRANT_TYPE_CLIENT_CREDENTIALS};
use helpscout_domain::{AccessToken, ClientConfig, HelpScoutError, Result, RetryPolicy, TokenResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::retry::Sleeper;
use crate::http::{HttpClient, HttpRequest};

const TOKEN_OPERATION: &str = "auth-token update request";

/// Source of bearer tokens for the API facade.
///
/// This trait allows dependency injection and testing with fake providers.
pub trait AccessTokenProvider {
    /// Get a valid access token, requesting a new one when `force` is set.
    fn access_token(&mut self, force: bool) -> Result<String>;
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

/// Token cache for the client-credentials grant.
///
/// Not shareable between threads without external locking; every method
/// that can change the cached token takes `&mut self`.
pub struct Authenticator {
    http: HttpClient,
    sleeper: Arc<dyn Sleeper>,
    auth_url: String,
    app_id: String,
    app_key: String,
    refresh_margin: Duration,
    retry: RetryPolicy,
    token: Option<AccessToken>,
}

impl Authenticator {
    /// Authenticator for the credentials and token endpoint of `config`,
    /// with no cached token.
    pub fn new(config: &ClientConfig, http: HttpClient, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            http,
            sleeper,
            auth_url: config.auth_url.clone(),
            app_id: config.app_id.clone(),
            app_key: config.app_key.clone(),
            refresh_margin: config.token_refresh_margin(),
            retry: config.retry.clone(),
            token: None,
        }
    }

    /// Current cached token, if any. It may already be stale.
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Replace the cached token, e.g. with one persisted by the caller.
    pub fn set_token(&mut self, value: impl Into<String>, expires_at: DateTime<Utc>) {
        self.token = Some(AccessToken::new(value, expires_at));
    }

    /// Return the cached token while it stays valid beyond the refresh
    /// margin, otherwise request a new one. `force` always requests.
    ///
    /// # Errors
    ///
    /// - `Credentials` when the token endpoint answers 401
    /// - `RateLimitExhausted` when it keeps answering 429
    /// - `InvalidResponse` when the answer carries no usable token
    /// - any transport error of the token request
    #[instrument(skip(self), fields(auth_url = %self.auth_url))]
    pub fn get_token(&mut self, force: bool) -> Result<String> {
        if !force {
            if let Some(token) = &self.token {
                if token.is_valid_at(Utc::now(), self.refresh_margin) {
                    debug!(expires_in_secs = token.seconds_until_expiry(Utc::now()), "reusing cached token");
                    return Ok(token.value.clone());
                }
            }
        }

        self.refresh()
    }

    fn refresh(&mut self) -> Result<String> {
        let request = HttpRequest::new(Method::POST, self.auth_url.as_str())
            .header(ACCEPT.as_str(), CONTENT_TYPE_JSON)
            .header(CONTENT_TYPE.as_str(), CONTENT_TYPE_JSON)
            .json(&TokenRequest {
                client_id: &self.app_id,
                client_secret: &self.app_key,
                grant_type: GRANT_TYPE_CLIENT_CREDENTIALS,
            })?;

        let mut rate_limited = 0;
        let response = loop {
            match self.http.send(&request) {
                Ok(response) => break response,
                Err(HelpScoutError::RateLimited) => {
                    rate_limited += 1;
                    if rate_limited > self.retry.max_rate_limit_retries {
                        return Err(HelpScoutError::RateLimitExhausted {
                            operation: TOKEN_OPERATION.into(),
                        });
                    }
                    warn!(attempt = rate_limited, "token endpoint rate limited, backing off");
                    self.sleeper.sleep(self.retry.rate_limit_delay());
                }
                Err(HelpScoutError::Unauthorized) => {
                    return Err(HelpScoutError::Credentials(format!(
                        "Unable to submit {TOKEN_OPERATION} (authorization failed)"
                    )));
                }
                Err(err) => return Err(err.context(format!("submit {TOKEN_OPERATION}"))),
            }
        };

        let issued_at = Utc::now();
        let token = response
            .parse::<TokenResponse>()
            .and_then(|payload| payload.into_token(issued_at))
            .map_err(|err| err.context("update auth token"))?;

        info!(expires_at = %token.expires_at, "access token refreshed");

        let value = token.value.clone();
        self.token = Some(token);
        Ok(value)
    }
}

impl AccessTokenProvider for Authenticator {
    fn access_token(&mut self, force: bool) -> Result<String> {
        self.get_token(force)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_url", &self.auth_url)
            .field("app_id", &self.app_id)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}
