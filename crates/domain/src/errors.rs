//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories of API errors, used to decide whether a failure is worth
/// retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication errors (401, rejected credentials)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Non-2xx answers from the API that are not auth or throttling
    Remote,
    /// Malformed input or unexpected response shapes - non-retryable
    Client,
    /// Network/connection errors
    Network,
    /// Configuration errors - non-retryable
    Config,
}

/// A single entry of the vendor error envelope (`_embedded.errors[]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFieldError {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub source: String,
}

/// `_embedded` part of the error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteErrorEmbedded {
    #[serde(default)]
    pub errors: Vec<RemoteFieldError>,
}

/// Structured error body returned by the API on validation and other
/// non-2xx failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "_embedded", default)]
    pub embedded: RemoteErrorEmbedded,
}

impl std::fmt::Display for RemoteErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for err in &self.embedded.errors {
            write!(f, "; {}: {}", err.path, err.message)?;
            if !err.source.is_empty() {
                write!(f, " ({})", err.source)?;
            }
        }
        Ok(())
    }
}

/// Main error type for the Help Scout client
#[derive(Error, Debug)]
pub enum HelpScoutError {
    /// The server answered 429. Retried internally; only escapes through
    /// the raw transport.
    #[error("Rate limit signalled by remote server")]
    RateLimited,

    /// The server answered 401. Triggers a forced token refresh.
    #[error("Request was not authorized")]
    Unauthorized,

    /// The token endpoint rejected the application id/key.
    #[error("Authentication failed: {0}")]
    Credentials(String),

    #[error("Unable to submit {operation} (rate-limit)")]
    RateLimitExhausted { operation: String },

    #[error("Unable to submit a request (authorization failed after {attempts} attempts)")]
    AuthorizationExhausted { attempts: u32 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Remote server returned an error: {status}{}", render_details(.details))]
    Remote { status: u16, details: Option<RemoteErrorBody> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A failure annotated with the operation that was being attempted.
    #[error("Unable to {operation}: {source}")]
    Operation { operation: String, source: Box<HelpScoutError> },
}

impl HelpScoutError {
    /// Annotate the error with the operation that failed.
    ///
    /// Errors that already name their operation, and the transport signals
    /// consumed by the retry loops, are returned unchanged.
    pub fn context(self, operation: impl Into<String>) -> Self {
        match self {
            Self::Operation { .. }
            | Self::RateLimitExhausted { .. }
            | Self::AuthorizationExhausted { .. }
            | Self::Credentials(_)
            | Self::RateLimited
            | Self::Unauthorized => self,
            other => Self::Operation { operation: operation.into(), source: Box::new(other) },
        }
    }

    /// The innermost error, with every operation annotation removed.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Operation { source, .. } => source.category(),
            Self::Unauthorized | Self::Credentials(_) | Self::AuthorizationExhausted { .. } => {
                ErrorCategory::Authentication
            }
            Self::RateLimited | Self::RateLimitExhausted { .. } => ErrorCategory::RateLimit,
            Self::Remote { .. } => ErrorCategory::Remote,
            Self::InvalidResponse(_) | Self::InvalidInput(_) => ErrorCategory::Client,
            Self::Network(_) => ErrorCategory::Network,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Whether the retry loops of the facade handle this error.
    ///
    /// Exhaustion errors are terminal even though they belong to a
    /// retryable category.
    pub fn is_retryable(&self) -> bool {
        matches!(self.root_cause(), Self::RateLimited | Self::Unauthorized)
    }

    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self.root_cause() {
            Self::RateLimited => Some(429),
            Self::Unauthorized => Some(401),
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn render_details(details: &Option<RemoteErrorBody>) -> String {
    details.as_ref().map(|d| format!(" [{d}]")).unwrap_or_default()
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, HelpScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_variants() {
        assert_eq!(HelpScoutError::Unauthorized.category(), ErrorCategory::Authentication);
        assert_eq!(
            HelpScoutError::Credentials("bad".into()).category(),
            ErrorCategory::Authentication
        );
        assert_eq!(HelpScoutError::RateLimited.category(), ErrorCategory::RateLimit);
        assert_eq!(
            HelpScoutError::RateLimitExhausted { operation: "a request".into() }.category(),
            ErrorCategory::RateLimit
        );
        assert_eq!(
            HelpScoutError::Remote { status: 404, details: None }.category(),
            ErrorCategory::Remote
        );
        assert_eq!(HelpScoutError::Network("down".into()).category(), ErrorCategory::Network);
    }

    #[test]
    fn only_transport_signals_are_retryable() {
        assert!(HelpScoutError::RateLimited.is_retryable());
        assert!(HelpScoutError::Unauthorized.is_retryable());
        assert!(!HelpScoutError::AuthorizationExhausted { attempts: 3 }.is_retryable());
        assert!(!HelpScoutError::RateLimitExhausted { operation: "x".into() }.is_retryable());
        assert!(!HelpScoutError::InvalidResponse("x".into()).is_retryable());
    }

    #[test]
    fn remote_error_renders_vendor_details() {
        let body: RemoteErrorBody = serde_json::from_str(
            r#"{
                "message": "Bad request",
                "_embedded": {
                    "errors": [
                        {"path": "mailboxId", "message": "must not be null", "source": "JSON"}
                    ]
                }
            }"#,
        )
        .unwrap();

        let err = HelpScoutError::Remote { status: 400, details: Some(body) };
        assert_eq!(
            err.to_string(),
            "Remote server returned an error: 400 [Bad request; mailboxId: must not be null (JSON)]"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn context_names_the_operation_and_keeps_the_cause() {
        let err = HelpScoutError::Remote { status: 500, details: None }
            .context("submit auth-token update request")
            .context("process request GET /users");

        assert_eq!(
            err.to_string(),
            "Unable to submit auth-token update request: Remote server returned an error: 500"
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert!(matches!(err.root_cause(), HelpScoutError::Remote { status: 500, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn context_leaves_self_describing_errors_alone() {
        let err = HelpScoutError::Credentials("bad key".into()).context("fetch users");
        assert!(matches!(err, HelpScoutError::Credentials(_)));

        let err = HelpScoutError::AuthorizationExhausted { attempts: 3 }.context("fetch users");
        assert!(matches!(err, HelpScoutError::AuthorizationExhausted { attempts: 3 }));
    }

    #[test]
    fn remote_error_without_details_shows_status_only() {
        let err = HelpScoutError::Remote { status: 503, details: None };
        assert_eq!(err.to_string(), "Remote server returned an error: 503");
    }
}
