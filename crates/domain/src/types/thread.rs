//! Thread types
//!
//! A thread is one message (reply, note, chat line...) inside a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::conversation::Source;
use super::user::{Customer, User};
use crate::impl_api_value_conversions;

/// Kind of message a thread holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadType {
    Beaconchat,
    Chat,
    Customer,
    Forwardchild,
    Forwardparent,
    Lineitem,
    Message,
    Note,
    Phone,
    Reply,
}

impl_api_value_conversions!(ThreadType {
    Beaconchat => "beaconchat",
    Chat => "chat",
    Customer => "customer",
    Forwardchild => "forwardchild",
    Forwardparent => "forwardparent",
    Lineitem => "lineitem",
    Message => "message",
    Note => "note",
    Phone => "phone",
    Reply => "reply",
});

/// Conversation status change recorded by a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Active,
    Closed,
    Nochange,
    Pending,
    Spam,
}

impl_api_value_conversions!(ThreadStatus {
    Active => "active",
    Closed => "closed",
    Nochange => "nochange",
    Pending => "pending",
    Spam => "spam",
});

/// Visibility state of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadState {
    Draft,
    Hidden,
    Published,
    Review,
}

impl_api_value_conversions!(ThreadState {
    Draft => "draft",
    Hidden => "hidden",
    Published => "published",
    Review => "review",
});

/// Author of a thread: either a user or a customer (see `kind`).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadCreator {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    #[serde(rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub kind: String,
    #[serde(rename = "first")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub first_name: String,
    #[serde(rename = "last")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub last_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub email: String,
}

/// Thread as listed by `GET /conversations/{id}/threads`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thread {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    #[serde(rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub kind: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub assigned_to: User,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub state: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub body: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub source: Source,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub customer: Customer,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub created_by: ThreadCreator,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub saved_reply_id: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub to: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cc: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub bcc: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub opened_at: Option<DateTime<Utc>>,
}
