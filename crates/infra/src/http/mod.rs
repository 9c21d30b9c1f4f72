//! HTTP transport
//!
//! [`HttpBackend`] does the raw exchange; [`HttpClient`] turns statuses into
//! API outcomes.

/// Raw request execution.
pub mod backend;
/// Status classification.
pub mod client;

pub use backend::{HttpBackend, HttpRequest, HttpResponse, ReqwestBackend};
pub use client::{ApiResponse, HttpClient, HttpClientBuilder};
