//! Configuration loading
//!
//! Builds a [`helpscout_domain::ClientConfig`] from environment variables
//! or a JSON/TOML file.

/// Environment and file loaders.
pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
