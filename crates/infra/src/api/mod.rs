//! Help Scout API client
//!
//! Layers, leaf-first:
//!
//! - [`Authenticator`]: client-credentials token cache
//! - [`ApiClient`]: authenticated calls with bounded rate-limit and
//!   re-authorization retries
//! - [`Paginator`]: lazy traversal of list endpoints
//! - resource operations on [`ApiClient`] for conversations, threads and
//!   users

/// Token cache.
pub mod auth;
/// Authenticated-call facade.
pub mod client;
/// Conversation listing and creation.
pub mod conversations;
/// List traversal.
pub mod pagination;
/// Sleeping between retries.
pub mod retry;
/// Thread listing.
pub mod threads;
/// User listing.
pub mod users;

pub use auth::{AccessTokenProvider, Authenticator};
pub use client::{ApiClient, HelpScoutClient};
pub use conversations::ConversationsEmbedded;
pub use pagination::{drive, ListOutcome, Paginator};
pub use retry::{Sleeper, ThreadSleeper};
pub use threads::ThreadsEmbedded;
pub use users::UsersEmbedded;
