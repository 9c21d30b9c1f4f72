//! Raw HTTP exchange
//!
//! [`HttpBackend`] performs a single request and hands back the status,
//! content type and body bytes without interpreting them. Status
//! classification lives in [`super::HttpClient`].

use std::time::Duration;

use helpscout_domain::constants::{CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use helpscout_domain::{HelpScoutError, QueryParams, Result};
use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::errors::InfraError;

/// Request handed to an [`HttpBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: QueryParams,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Request without headers, query or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// Set a header, replacing an earlier value of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Replace the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `HelpScoutError::InvalidInput` when the value cannot be
    /// serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(|e| {
            HelpScoutError::InvalidInput(format!("Unable to marshal request data: {e}"))
        })?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Value of header `name`, compared case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// `METHOD url`, used to describe the request in errors and logs.
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// Unclassified answer of an [`HttpBackend`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs a single HTTP exchange.
///
/// Implementations must not retry or interpret status codes.
pub trait HttpBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `HelpScoutError::Network` when no response was received.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking `reqwest` backend.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: ReqwestClient,
}

impl ReqwestBackend {
    /// Backend with the default 5s connect and 10s overall timeouts.
    pub fn new() -> Result<Self> {
        Self::with_timeouts(CONNECT_TIMEOUT, REQUEST_TIMEOUT, None)
    }

    /// Backend with explicit timeouts and an optional `User-Agent`.
    pub fn with_timeouts(
        connect_timeout: Duration,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self> {
        let mut builder = ReqwestClient::builder().connect_timeout(connect_timeout).timeout(timeout);

        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            HelpScoutError::from(infra)
        })?;

        Ok(Self { client })
    }
}

impl HttpBackend for ReqwestBackend {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|err| network_error(request, err))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().map_err(|err| network_error(request, err))?.to_vec();

        debug!(method = %request.method, url = %request.url, status, bytes = body.len(), "received HTTP response");

        Ok(HttpResponse { status, content_type, body })
    }
}

fn network_error(request: &HttpRequest, err: reqwest::Error) -> HelpScoutError {
    let infra: InfraError = err.into();
    match HelpScoutError::from(infra) {
        HelpScoutError::Network(msg) => {
            HelpScoutError::Network(format!("Unable to process request {}: {msg}", request.describe()))
        }
        other => other,
    }
}
