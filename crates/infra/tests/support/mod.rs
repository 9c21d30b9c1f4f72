//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use helpscout_infra::testing::{mock_client, MockBackend, RecordingSleeper, TEST_AUTH_URL};
use helpscout_infra::HelpScoutClient;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Scripted client whose token endpoint already has one token queued.
pub struct Harness {
    pub backend: Arc<MockBackend>,
    pub sleeper: Arc<RecordingSleeper>,
    pub client: HelpScoutClient,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        let backend = Arc::new(MockBackend::new());
        let sleeper = Arc::new(RecordingSleeper::new());
        backend.push_token(TEST_AUTH_URL, "token-1", 7200);
        let client = mock_client(&backend, &sleeper);
        Self { backend, sleeper, client }
    }

    pub fn token_requests(&self) -> usize {
        self.backend.request_count(TEST_AUTH_URL)
    }

    /// Bearer tokens sent to `url`, in request order.
    pub fn bearer_tokens(&self, url: &str) -> Vec<String> {
        self.backend
            .requests_to(url)
            .iter()
            .filter_map(|r| r.header_value("authorization").map(str::to_string))
            .collect()
    }
}
