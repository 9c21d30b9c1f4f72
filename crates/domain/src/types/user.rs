//! User and customer types
//!
//! Users are the helpdesk agents (`/users`); customers are the people on the
//! other side of a conversation.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Helpdesk user, as listed by `/users` and embedded as assignee/creator.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
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

impl User {
    /// "First Last", trimmed when either part is missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Customer reference embedded in threads.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: u64,
    #[serde(rename = "first")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub first_name: String,
    #[serde(rename = "last")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub last_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub email: String,
}
