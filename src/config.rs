//! Gateway configuration loaded from environment variables.
//!
//! Everything has a sensible default so the CLI works out of the box against
//! the production backend; tests override `api_base_url` to point at a local
//! stub server.

use std::env;
use std::path::PathBuf;

/// Default FitSync backend base URL (no trailing slash).
pub const DEFAULT_API_BASE_URL: &str = "https://bitnbuild-brown.vercel.app/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the FitSync REST API
    pub api_base_url: String,
    /// Directory the credential store persists into
    pub state_dir: PathBuf,
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let state_dir = match env::var("FITSYNC_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_state_dir(),
        };

        let timeout_secs = match env::var("FITSYNC_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("FITSYNC_TIMEOUT_SECS"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url: env::var("FITSYNC_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            state_dir,
            timeout_secs,
        })
    }

    /// Config for tests: given base URL, state under a caller-owned directory.
    pub fn test_default(api_base_url: impl Into<String>, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            state_dir: state_dir.into(),
            timeout_secs: 5,
        }
    }
}

/// `~/.fitsync`, falling back to a path relative to the working directory
/// when no home directory is discoverable.
fn default_state_dir() -> PathBuf {
    match env::var("HOME").or_else(|_| env::var("USERPROFILE")) {
        Ok(home) => PathBuf::from(home).join(".fitsync"),
        Err(_) => PathBuf::from(".fitsync"),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
