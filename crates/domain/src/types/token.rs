//! OAuth 2.0 client-credentials token types

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{HelpScoutError, Result};

/// Cached bearer token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Token `value` expiring at `expires_at`.
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self { value: value.into(), expires_at }
    }

    /// A token is reusable when it is non-empty and still valid for longer
    /// than `margin` after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        if self.value.is_empty() {
            return false;
        }
        let margin = chrono::Duration::from_std(margin).unwrap_or(chrono::Duration::MAX);
        match now.checked_add_signed(margin) {
            Some(deadline) => self.expires_at > deadline,
            None => false,
        }
    }

    /// Seconds until the token expires; negative once expired.
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }
}

/// Body of a successful token endpoint answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}

impl TokenResponse {
    /// Validate the payload and turn it into a token expiring `expires_in`
    /// seconds after `issued_at`.
    pub fn into_token(self, issued_at: DateTime<Utc>) -> Result<AccessToken> {
        if self.access_token.is_empty() || self.expires_in <= 0 {
            return Err(HelpScoutError::InvalidResponse(format!(
                "authorization server returned invalid token data (token empty: {}, token_type: {:?}, expires_in: {})",
                self.access_token.is_empty(),
                self.token_type,
                self.expires_in
            )));
        }

        let expires_at = chrono::TimeDelta::try_seconds(self.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                HelpScoutError::InvalidResponse(format!(
                    "authorization server returned an out-of-range token lifetime (expires_in: {})",
                    self.expires_in
                ))
            })?;
        Ok(AccessToken { value: self.access_token, expires_at })
    }
}
