//! Infrastructure-side error conversions

/// Conversions from third-party errors.
pub mod conversions;

pub use conversions::InfraError;
