//! Status classification of API answers
//!
//! [`HttpClient`] sends a request through an [`HttpBackend`] and maps the
//! HTTP status to an [`ApiResponse`] or to the matching [`HelpScoutError`].

use std::sync::Arc;
use std::time::Duration;

use helpscout_domain::constants::{
    CONNECT_TIMEOUT, CONTENT_TYPE_HAL_JSON, CONTENT_TYPE_JSON, REQUEST_TIMEOUT,
};
use helpscout_domain::{HelpScoutError, RemoteErrorBody, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::backend::{HttpBackend, HttpRequest, ReqwestBackend};
use crate::errors::InfraError;

/// Successful answer of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// 201, body ignored.
    Created,
    /// 200 with a JSON body.
    Json(Vec<u8>),
}

impl ApiResponse {
    /// Parse the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// `HelpScoutError::InvalidResponse` when the answer had no body or the
    /// body does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Self::Json(body) => serde_json::from_slice(body).map_err(|err| {
                let infra: InfraError = err.into();
                HelpScoutError::from(infra)
            }),
            Self::Created => Err(HelpScoutError::InvalidResponse(
                "expected a response body, server answered 201 Created".into(),
            )),
        }
    }
}

/// HTTP transport that classifies statuses into API outcomes.
///
/// | status | outcome |
/// |---|---|
/// | 201 | [`ApiResponse::Created`] |
/// | 200 | [`ApiResponse::Json`] if the content type is JSON |
/// | 429 | `HelpScoutError::RateLimited` |
/// | 401 | `HelpScoutError::Unauthorized` |
/// | other | `HelpScoutError::Remote` |
#[derive(Clone)]
pub struct HttpClient {
    backend: Arc<dyn HttpBackend>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Transport over an arbitrary backend.
    pub fn with_backend(backend: Arc<dyn HttpBackend>) -> Self {
        Self { backend }
    }

    /// Execute `request` and classify the answer.
    pub fn send(&self, request: &HttpRequest) -> Result<ApiResponse> {
        debug!(method = %request.method, url = %request.url, "sending HTTP request");

        let response = self.backend.execute(request)?;

        match response.status {
            201 => Ok(ApiResponse::Created),
            200 => {
                let content_type = response.content_type.unwrap_or_default();
                if !content_type.contains(CONTENT_TYPE_JSON)
                    && !content_type.contains(CONTENT_TYPE_HAL_JSON)
                {
                    return Err(HelpScoutError::InvalidResponse(format!(
                        "Remote server returned an invalid content type: {content_type}"
                    )));
                }
                Ok(ApiResponse::Json(response.body))
            }
            429 => Err(HelpScoutError::RateLimited),
            401 => Err(HelpScoutError::Unauthorized),
            status => {
                let details = parse_error_body(&response.body);
                debug!(status, has_details = details.is_some(), "remote error");
                Err(HelpScoutError::Remote { status, details })
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}

fn parse_error_body(body: &[u8]) -> Option<RemoteErrorBody> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice::<RemoteErrorBody>(body)
        .ok()
        .filter(|details| !details.message.is_empty() || !details.embedded.errors.is_empty())
}

/// Builder for [`HttpClient`] over the `reqwest` backend.
#[derive(Debug)]
pub struct HttpClientBuilder {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { connect_timeout: CONNECT_TIMEOUT, timeout: REQUEST_TIMEOUT, user_agent: None }
    }
}

impl HttpClientBuilder {
    /// TCP connect deadline.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Overall deadline of a single request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` header sent with every request.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client on a blocking reqwest backend.
    pub fn build(self) -> Result<HttpClient> {
        let backend = ReqwestBackend::with_timeouts(
            self.connect_timeout,
            self.timeout,
            self.user_agent.as_deref(),
        )?;
        Ok(HttpClient::with_backend(Arc::new(backend)))
    }
}
