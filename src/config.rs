//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recipe API server (without the `/api` suffix)
    pub api_url: String,
    /// Directory holding the durable storage file
    pub data_dir: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from(".recipe-client"),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("API_URL").map_err(|_| ConfigError::Missing("API_URL"))?;
        let api_url = api_url.trim().trim_end_matches('/').to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid("API_URL", api_url));
        }

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS", v))?,
            Err(_) => Duration::from_secs(30),
        };

        Ok(Self {
            api_url,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".recipe-client")),
            request_timeout,
        })
    }

    /// Root of the API endpoints.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.api_url)
    }

    /// Absolute URL of a server-relative image path.
    pub fn image_url(&self, image_path: &str) -> String {
        format!("{}{}", self.api_url, image_path)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
