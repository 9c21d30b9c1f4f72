//! # Help Scout Domain
//!
//! Types, filters and errors for the Help Scout Mailbox API client.
//!
//! This crate contains:
//! - Resource records (conversations, threads, users) and creation payloads
//! - The paging envelope and query parameter map shared by list endpoints
//! - The conversation filter and its search expression rendering
//! - OAuth token types
//! - Client configuration, error types and Result definitions
//!
//! ## Architecture
//! - No I/O: transport, authentication and pagination live in
//!   `helpscout-infra`
//! - Only external dependencies allowed

/// Client configuration structures.
pub mod config;
/// Fixed endpoints, limits and wire names.
pub mod constants;
/// Error taxonomy.
pub mod errors;
/// Conversation filter and its search expression.
pub mod filter;
/// Conversions for wire enums.
pub mod macros;
/// API records and shared value types.
pub mod types;

// Re-export commonly used items
pub use config::{ClientConfig, RetryPolicy};
pub use errors::{
    ErrorCategory, HelpScoutError, RemoteErrorBody, RemoteErrorEmbedded, RemoteFieldError, Result,
};
pub use filter::{ConditionType, ConversationFilter, FilterValues, TimePeriod};
pub use types::*;
