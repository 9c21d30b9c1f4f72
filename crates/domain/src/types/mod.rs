//! Domain types and models
//!
//! Flat records mirroring the JSON shapes of the Help Scout API, plus the
//! small value types (pages, query parameters, tokens) shared by the client.

/// Conversations and their creation payload.
pub mod conversation;
/// Paging envelope of list endpoints.
pub mod page;
/// Query parameters.
pub mod query;
/// Threads of a conversation.
pub mod thread;
/// OAuth tokens.
pub mod token;
/// Users and customers.
pub mod user;

pub use conversation::{
    Conversation, ConversationCreateRequest, ConversationState, ConversationStatus,
    ConversationThread, ConversationType, CreatedByKind, CustomField, CustomerWaitingSince,
    EmailAddress, PrimaryCustomer, Source, TagShort,
};
pub use page::{EmbeddedItems, ListEnvelope, Page};
pub use query::QueryParams;
pub use thread::{Thread, ThreadCreator, ThreadState, ThreadStatus, ThreadType};
pub use token::{AccessToken, TokenResponse};
pub use user::{Customer, User};
