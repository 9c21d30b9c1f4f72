//! Conversation types
//!
//! Conversations are the tickets of the helpdesk. The listing shape mirrors
//! `GET /conversations`; the creation shape is what `POST /conversations`
//! accepts for a new outgoing email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::thread::ThreadType;
use super::user::User;
use crate::constants::UPSTREAM_TAG;
use crate::errors::{HelpScoutError, Result};
use crate::impl_api_value_conversions;

/// Channel a conversation came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    Email,
    Chat,
    Phone,
}

impl_api_value_conversions!(ConversationType {
    Email => "email",
    Chat => "chat",
    Phone => "phone",
});

/// Workflow status of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Open,
    Closed,
    Active,
    Pending,
    Spam,
}

impl_api_value_conversions!(ConversationStatus {
    Open => "open",
    Closed => "closed",
    Active => "active",
    Pending => "pending",
    Spam => "spam",
});

/// Lifecycle state of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationState {
    Published,
    Draft,
    Deleted,
}

impl_api_value_conversions!(ConversationState {
    Published => "published",
    Draft => "draft",
    Deleted => "deleted",
});

/// Who authored the latest reply of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatedByKind {
    User,
    Customer,
}

impl_api_value_conversions!(CreatedByKind {
    User => "user",
    Customer => "customer",
});

/// Tag as embedded in a conversation.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagShort {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub color: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub tag: String,
}

/// Mailbox custom field value.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub value: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub text: String,
}

/// Origin of a conversation or thread (`via` is `customer` or `user`).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub via: String,
    #[serde(rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub kind: String,
}

/// How long the customer has been waiting for an answer.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerWaitingSince {
    pub time: Option<DateTime<Utc>>,
    #[serde(rename = "friendly")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub friendly_wait_period: String,
    #[serde(rename = "latestReplyFrom")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub by: String,
}

/// Reference to the main customer of a conversation.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryCustomer {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
}

/// Conversation as listed by `GET /conversations`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conversation {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub number: u64,
    /// Number of threads in the conversation.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub threads: u64,
    #[serde(rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub kind: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub folder_id: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub state: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub subject: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub preview: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub mailbox_id: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub assignee: User,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub created_by: User,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(rename = "userUpdatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub closed_by: u64,
    #[serde(rename = "customerWaitingSince")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub answered: CustomerWaitingSince,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub source: Source,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub tags: Vec<TagShort>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cc: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub bcc: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub primary_customer: PrimaryCustomer,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub custom_fields: Vec<CustomField>,
}

/// `{"email": ...}` reference used by creation payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
}

/// Thread embedded in a conversation creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationThread {
    #[serde(rename = "type")]
    pub kind: ThreadType,
    #[serde(rename = "text")]
    pub body: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub customer: EmailAddress,
}

/// Body of `POST /conversations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationCreateRequest {
    #[serde(rename = "type")]
    pub kind: ConversationType,
    pub customer: EmailAddress,
    pub subject: String,
    pub mailbox_id: u64,
    pub tags: Vec<String>,
    pub status: ConversationStatus,
    #[serde(rename = "user")]
    pub created_by: u64,
    pub threads: Vec<ConversationThread>,
}

impl ConversationCreateRequest {
    /// Build an active email conversation sent by `sender` to `to`.
    ///
    /// The first recipient becomes the customer; the remaining recipients
    /// are appended to the carbon copies after `cc`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `to` is empty.
    pub fn email(
        sender: &User,
        mailbox_id: u64,
        to: &[String],
        cc: &[String],
        bcc: &[String],
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let (customer, other_recipients) = to.split_first().ok_or_else(|| {
            HelpScoutError::InvalidInput("conversation needs at least one recipient".into())
        })?;

        let customer = EmailAddress { email: customer.clone() };
        let cc = cc.iter().chain(other_recipients).cloned().collect();

        Ok(Self {
            kind: ConversationType::Email,
            customer: customer.clone(),
            subject: subject.into(),
            mailbox_id,
            tags: vec![UPSTREAM_TAG.to_string()],
            status: ConversationStatus::Active,
            created_by: sender.id,
            threads: vec![ConversationThread {
                kind: ThreadType::Reply,
                body: body.into(),
                cc,
                bcc: bcc.to_vec(),
                customer,
            }],
        })
    }
}
