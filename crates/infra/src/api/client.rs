//! Authenticated API calls with bounded retries
//!
//! Every call runs at most `max_auth_cycles` token/request cycles. Inside a
//! cycle a 429 is retried with the same token after a fixed delay; a 401
//! ends the cycle and the next one forces a token refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use helpscout_domain::constants::CONTENT_TYPE_JSON;
use helpscout_domain::{
    AccessToken, ClientConfig, HelpScoutError, QueryParams, Result, RetryPolicy,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::auth::{AccessTokenProvider, Authenticator};
use super::retry::{Sleeper, ThreadSleeper};
use crate::http::{ApiResponse, HttpBackend, HttpClient, HttpRequest};

/// Help Scout API client with the built-in OAuth token cache.
pub type HelpScoutClient = ApiClient<Authenticator>;

/// API facade over a token provider and the HTTP transport.
pub struct ApiClient<P: AccessTokenProvider = Authenticator> {
    http: HttpClient,
    auth: P,
    base_url: String,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl ApiClient<Authenticator> {
    /// Client for the production API with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `Config` when a credential is empty and `Network` when the
    /// HTTP client cannot be built.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::new(app_id, app_key))
    }

    /// Client built from a validated configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = HttpClient::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder.build()?;

        Ok(Self::assemble(config, http, Arc::new(ThreadSleeper)))
    }

    /// Client over an arbitrary backend and sleeper. The configuration is
    /// used as given.
    pub fn with_backend(
        config: &ClientConfig,
        backend: Arc<dyn HttpBackend>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self::assemble(config, HttpClient::with_backend(backend), sleeper)
    }

    fn assemble(config: &ClientConfig, http: HttpClient, sleeper: Arc<dyn Sleeper>) -> Self {
        let auth = Authenticator::new(config, http.clone(), sleeper.clone());
        Self::with_provider(config, http, auth, sleeper)
    }

    /// Fetch the current token, requesting a new one when needed or forced.
    pub fn get_token(&mut self, force: bool) -> Result<String> {
        self.auth.get_token(force)
    }

    /// Inject a token and its expiry, e.g. one persisted across runs.
    pub fn set_token(&mut self, value: impl Into<String>, expires_at: DateTime<Utc>) {
        self.auth.set_token(value, expires_at);
    }

    /// Current cached token, if any.
    pub fn token(&self) -> Option<&AccessToken> {
        self.auth.token()
    }
}

impl<P: AccessTokenProvider> ApiClient<P> {
    /// Facade over an arbitrary token source.
    pub fn with_provider(
        config: &ClientConfig,
        http: HttpClient,
        auth: P,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            http,
            auth,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone(),
            sleeper,
        }
    }

    /// Perform an authenticated call against `resource` (e.g. `/users`).
    ///
    /// # Errors
    ///
    /// - `RateLimitExhausted` when one token keeps getting 429
    /// - `AuthorizationExhausted` when every cycle ends with 401
    /// - token provider errors and any other transport error, unchanged
    #[instrument(skip(self, query, body))]
    pub fn call<T: Serialize + ?Sized>(
        &mut self,
        method: Method,
        resource: &str,
        query: &QueryParams,
        body: Option<&T>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, resource);
        let mut request = HttpRequest::new(method.clone(), url)
            .header(ACCEPT.as_str(), CONTENT_TYPE_JSON)
            .header(CONTENT_TYPE.as_str(), CONTENT_TYPE_JSON)
            .query(query.clone());
        if let Some(body) = body {
            request = request.json(body)?;
        }

        for cycle in 0..self.retry.max_auth_cycles {
            let token = self
                .auth
                .access_token(cycle > 0)
                .map_err(|err| err.context(format!("authorize {method} {resource}")))?;
            let request = request.clone().header(AUTHORIZATION.as_str(), format!("Bearer {token}"));

            let mut rate_limited = 0;
            loop {
                debug!(cycle, attempt = rate_limited + 1, "calling API");
                match self.http.send(&request) {
                    Err(HelpScoutError::RateLimited) => {
                        rate_limited += 1;
                        if rate_limited > self.retry.max_rate_limit_retries {
                            return Err(HelpScoutError::RateLimitExhausted {
                                operation: format!("{method} {resource}"),
                            });
                        }
                        warn!(attempt = rate_limited, "rate limited, backing off");
                        self.sleeper.sleep(self.retry.rate_limit_delay());
                    }
                    Err(HelpScoutError::Unauthorized) => {
                        warn!(cycle, "request unauthorized, forcing token refresh");
                        break;
                    }
                    outcome => {
                        return outcome
                            .map_err(|err| err.context(format!("process request {method} {resource}")))
                    }
                }
            }
        }

        Err(HelpScoutError::AuthorizationExhausted { attempts: self.retry.max_auth_cycles })
    }

    /// GET `resource` and parse the JSON answer.
    pub fn get<R: DeserializeOwned>(&mut self, resource: &str, query: &QueryParams) -> Result<R> {
        self.call::<()>(Method::GET, resource, query, None)?
            .parse()
            .map_err(|err| err.context(format!("read response of GET {resource}")))
    }

    /// POST `body` to `resource`. A 201 answer carries no data.
    pub fn post<T: Serialize + ?Sized>(&mut self, resource: &str, body: &T) -> Result<ApiResponse> {
        self.call(Method::POST, resource, &QueryParams::new(), Some(body))
    }

    /// The token source.
    pub fn provider(&self) -> &P {
        &self.auth
    }
}

impl<P: AccessTokenProvider> std::fmt::Debug for ApiClient<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
