//! Test doubles for the transport and retry seams
//!
//! Available in unit tests and, for integration tests, behind the
//! `test-utils` feature.

#![allow(clippy::missing_errors_doc)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use helpscout_domain::{ClientConfig, HelpScoutError, Result};
use serde_json::{json, Value};

use crate::api::{HelpScoutClient, Sleeper};
use crate::http::{HttpBackend, HttpRequest, HttpResponse};

/// API base URL of [`test_config`].
pub const TEST_API_BASE: &str = "https://helpscout.test/v2";
/// Token endpoint of [`test_config`].
pub const TEST_AUTH_URL: &str = "https://helpscout.test/v2/oauth2/token";

type ResponseSequenceMap = Mutex<HashMap<String, VecDeque<HttpResponse>>>;

/// Scripted [`HttpBackend`].
///
/// Responses are queued per URL (query string excluded) and handed out in
/// order. Every request is recorded.
///
/// ```
/// use helpscout_infra::testing::MockBackend;
///
/// let backend = MockBackend::new();
/// backend.push_status("https://helpscout.test/v2/users", 429);
/// backend.push_json("https://helpscout.test/v2/users", 200, &serde_json::json!({}));
/// assert_eq!(backend.pending("https://helpscout.test/v2/users"), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockBackend {
    sequences: ResponseSequenceMap,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockBackend {
    /// Backend with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `response` for the next request to `url`.
    pub fn push(&self, url: &str, response: HttpResponse) {
        let mut sequences = self.sequences.lock().unwrap_or_else(PoisonError::into_inner);
        sequences.entry(url.to_string()).or_default().push_back(response);
    }

    /// Queue a response with the given status, content type and body.
    pub fn push_response(&self, url: &str, status: u16, content_type: Option<&str>, body: &str) {
        self.push(
            url,
            HttpResponse {
                status,
                content_type: content_type.map(str::to_string),
                body: body.as_bytes().to_vec(),
            },
        );
    }

    /// Queue a JSON response.
    pub fn push_json(&self, url: &str, status: u16, body: &Value) {
        self.push_response(url, status, Some("application/json"), &body.to_string());
    }

    /// Queue an empty answer with the given status.
    pub fn push_status(&self, url: &str, status: u16) {
        self.push_response(url, status, None, "");
    }

    /// Queue a successful token endpoint answer.
    pub fn push_token(&self, url: &str, token: &str, expires_in: i64) {
        self.push_json(url, 200, &token_json(token, expires_in));
    }

    /// Responses still queued for `url`.
    pub fn pending(&self, url: &str) -> usize {
        let sequences = self.sequences.lock().unwrap_or_else(PoisonError::into_inner);
        sequences.get(url).map_or(0, VecDeque::len)
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Requests received for `url`, in order.
    pub fn requests_to(&self, url: &str) -> Vec<HttpRequest> {
        self.requests().into_iter().filter(|request| request.url == url).collect()
    }

    /// Number of requests received for `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests_to(url).len()
    }
}

impl HttpBackend for MockBackend {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());

        let mut sequences = self.sequences.lock().unwrap_or_else(PoisonError::into_inner);
        sequences.get_mut(&request.url).and_then(VecDeque::pop_front).ok_or_else(|| {
            HelpScoutError::Network(format!("no mock response configured for {}", request.describe()))
        })
    }
}

/// [`Sleeper`] that records requested delays instead of blocking.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Sleeper with no recorded delays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded sleep, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of recorded sleeps.
    pub fn count(&self) -> usize {
        self.sleeps.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap_or_else(PoisonError::into_inner).push(duration);
    }
}

/// Configuration pointing at the fake endpoints used by [`MockBackend`]
/// scripts.
pub fn test_config() -> ClientConfig {
    ClientConfig {
        api_base_url: TEST_API_BASE.to_string(),
        auth_url: TEST_AUTH_URL.to_string(),
        ..ClientConfig::new("test-app-id", "test-app-key")
    }
}

/// Client wired to the given doubles.
pub fn mock_client(backend: &Arc<MockBackend>, sleeper: &Arc<RecordingSleeper>) -> HelpScoutClient {
    HelpScoutClient::with_backend(&test_config(), backend.clone(), sleeper.clone())
}

/// URL of `resource` under [`TEST_API_BASE`].
pub fn api_url(resource: &str) -> String {
    format!("{TEST_API_BASE}{resource}")
}

/// Token endpoint answer.
pub fn token_json(token: &str, expires_in: i64) -> Value {
    json!({"access_token": token, "token_type": "bearer", "expires_in": expires_in})
}

/// One page of a list response with `items` under `_embedded.<key>`.
pub fn page_json(key: &str, items: Value, number: u32, total_pages: u32) -> Value {
    let size = items.as_array().map_or(0, Vec::len);
    let mut embedded = serde_json::Map::new();
    embedded.insert(key.to_string(), items);
    json!({
        "_embedded": embedded,
        "page": {
            "size": size,
            "totalElements": size as u32 * total_pages,
            "totalPages": total_pages,
            "number": number
        }
    })
}
