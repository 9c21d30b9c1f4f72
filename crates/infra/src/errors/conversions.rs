//! Conversions from external infrastructure errors into domain errors.

use helpscout_domain::HelpScoutError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HelpScoutError);

impl From<InfraError> for HelpScoutError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HelpScoutError> for InfraError {
    fn from(value: HelpScoutError) -> Self {
        InfraError(value)
    }
}

trait IntoHelpScoutError {
    fn into_helpscout(self) -> HelpScoutError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HelpScoutError */
/* -------------------------------------------------------------------------- */

impl IntoHelpScoutError for HttpError {
    fn into_helpscout(self) -> HelpScoutError {
        if self.is_builder() {
            return HelpScoutError::InvalidInput(format!("unable to prepare request: {self}"));
        }

        if self.is_timeout() {
            return HelpScoutError::Network(format!("HTTP request timed out: {self}"));
        }

        if self.is_connect() {
            return HelpScoutError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return HelpScoutError::Network(format!("unable to read response body: {self}"));
        }

        HelpScoutError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_helpscout())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HelpScoutError */
/* -------------------------------------------------------------------------- */

impl IntoHelpScoutError for JsonError {
    fn into_helpscout(self) -> HelpScoutError {
        // Request bodies are serialized separately, see `HttpRequest::json`.
        match self.classify() {
            serde_json::error::Category::Io => {
                HelpScoutError::Network(format!("unable to read JSON: {self}"))
            }
            _ => HelpScoutError::InvalidResponse(format!("unable to parse response body as JSON: {self}")),
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_helpscout())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → HelpScoutError */
/* -------------------------------------------------------------------------- */

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        InfraError(HelpScoutError::Config(format!("Invalid TOML format: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
