/// Configuration for the Taskboard client
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `TASKBOARD_API_URL`: Base URL of the API, including the `/api` prefix
///   (default: `http://localhost:8000/api`)
/// - `TASKBOARD_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds
///   (default: 30)
/// - `TASKBOARD_TOKEN_PATH`: Override for the durable token file location
///
/// # Example
///
/// ```no_run
/// use taskboard_client::config::ClientConfig;
///
/// # fn example() -> taskboard_client::error::ClientResult<()> {
/// let config = ClientConfig::from_env()?;
/// println!("talking to {}", config.base_url);
/// # Ok(())
/// # }
/// ```

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default API base URL for local development
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, including any path prefix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Where to persist the bearer token, if overridden
    pub token_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `TASKBOARD_REQUEST_TIMEOUT_SECS` is set but not a
    /// number.
    pub fn from_env() -> ClientResult<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let base_url =
            env::var("TASKBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let request_timeout_secs = match env::var("TASKBOARD_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ClientError::Config(format!(
                    "TASKBOARD_REQUEST_TIMEOUT_SECS must be a number, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let token_path = env::var("TASKBOARD_TOKEN_PATH").ok().map(PathBuf::from);

        Ok(Self {
            base_url,
            request_timeout_secs,
            token_path,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            token_path: None,
        }
    }
}
