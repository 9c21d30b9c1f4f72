//! API constants
//!
//! Fixed endpoints, limits and media types of the Help Scout Mailbox API v2.

use std::time::Duration;

/// Base URL of every resource.
pub const HELPSCOUT_API_ENDPOINT: &str = "https://api.helpscout.net/v2";
/// OAuth token endpoint.
pub const HELPSCOUT_AUTH_ENDPOINT: &str = "https://api.helpscout.net/v2/oauth2/token";

/// The only grant this client uses.
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// A cached token is reused only while it stays valid for at least this long.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(10 * 60);

/// Default TCP connect deadline.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default overall request deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Retry bounds
/// Retries after a 429 before the call fails.
pub const MAX_RATE_LIMIT_RETRIES: u32 = 10;
/// Token/request cycles before a persistent 401 fails the call.
pub const MAX_AUTH_CYCLES: u32 = 3;
/// Pause between rate-limited attempts.
pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);

// Media types accepted on 200 responses
/// Plain JSON media type.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// HAL media type used by list endpoints.
pub const CONTENT_TYPE_HAL_JSON: &str = "application/hal+json";

// Query parameters
/// 1-based page number of list endpoints.
pub const QUERY_PARAM_PAGE: &str = "page";
/// Conversation status of a listing.
pub const QUERY_PARAM_STATUS: &str = "status";
/// Search expression of a conversation listing.
pub const QUERY_PARAM_QUERY: &str = "query";

/// Tag attached to every conversation created through this client.
pub const UPSTREAM_TAG: &str = "upstream";

/// Timestamp layout used inside search query expressions.
pub const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
