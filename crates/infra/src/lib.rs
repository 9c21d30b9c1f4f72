//! # Help Scout Infrastructure
//!
//! I/O side of the Help Scout API client.
//!
//! This crate contains:
//! - The HTTP transport and its status classification
//! - OAuth client-credentials authentication with a cached token
//! - The authenticated-call facade with bounded retries
//! - Paginated listing of conversations, threads and users
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Domain types, filters and errors come from `helpscout-domain`
//! - All network access goes through [`http::HttpBackend`]
//!
//! ```no_run
//! use helpscout_infra::HelpScoutClient;
//!
//! # fn main() -> helpscout_domain::Result<()> {
//! let mut client = HelpScoutClient::new("app-id", "app-key")?;
//! let outcome = client.list_users(|user| {
//!     tracing::info!(id = user.id, email = %user.email, "user");
//!     true
//! })?;
//! assert!(!outcome.is_interrupted());
//! # Ok(())
//! # }
//! ```

/// Authentication, the call facade and resource operations.
pub mod api;
/// Configuration loading.
pub mod config;
/// Infrastructure error conversions.
pub mod errors;
/// HTTP transport.
pub mod http;
/// Scripted test doubles.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiClient, Authenticator, HelpScoutClient, ListOutcome, Paginator,
    Sleeper, ThreadSleeper,
};
pub use errors::InfraError;
pub use http::{ApiResponse, HttpBackend, HttpClient, HttpRequest, HttpResponse, ReqwestBackend};
