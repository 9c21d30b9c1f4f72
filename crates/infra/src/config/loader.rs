//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the credentials are missing there, falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `HELPSCOUT_APP_ID`: OAuth application id (required)
//! - `HELPSCOUT_APP_KEY`: OAuth application secret (required)
//! - `HELPSCOUT_API_URL`: API base URL
//! - `HELPSCOUT_AUTH_URL`: token endpoint
//! - `HELPSCOUT_TIMEOUT_SECS`: overall request timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./helpscout.toml` or `./helpscout.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use helpscout_domain::{ClientConfig, HelpScoutError, Result};

use crate::errors::InfraError;

/// OAuth application id.
pub const ENV_APP_ID: &str = "HELPSCOUT_APP_ID";
/// OAuth application secret.
pub const ENV_APP_KEY: &str = "HELPSCOUT_APP_KEY";
/// API base URL override.
pub const ENV_API_URL: &str = "HELPSCOUT_API_URL";
/// Token endpoint override.
pub const ENV_AUTH_URL: &str = "HELPSCOUT_AUTH_URL";
/// Overall request timeout override, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "HELPSCOUT_TIMEOUT_SECS";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["helpscout.toml", "helpscout.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the credentials
/// are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `HelpScoutError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `HELPSCOUT_APP_ID` and `HELPSCOUT_APP_KEY` must be present; everything
/// else falls back to the defaults.
///
/// # Errors
/// Returns `HelpScoutError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var(ENV_APP_ID)?, env_var(ENV_APP_KEY)?);

    if let Some(url) = optional_env_var(ENV_API_URL) {
        config.api_base_url = url;
    }
    if let Some(url) = optional_env_var(ENV_AUTH_URL) {
        config.auth_url = url;
    }
    if let Some(timeout) = optional_env_var(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = timeout.parse::<u64>().map_err(|e| {
            HelpScoutError::Config(format!("Invalid {ENV_TIMEOUT_SECS}: {e}"))
        })?;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `HelpScoutError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HelpScoutError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HelpScoutError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HelpScoutError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| HelpScoutError::from(InfraError::from(e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HelpScoutError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(HelpScoutError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut directories = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        directories.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            directories.push(exe_dir.to_path_buf());
        }
    }

    directories
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    optional_env_var(key).ok_or_else(|| {
        HelpScoutError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Set and non-blank variable.
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
