/// Error handling for the Taskboard client
///
/// This module provides the unified error type returned by every client
/// operation. Network and HTTP failures propagate to the caller unchanged;
/// the client performs no retries and no recovery.
///
/// # Example
///
/// ```
/// use taskboard_client::error::ClientError;
///
/// fn describe(err: &ClientError) -> &'static str {
///     if err.is_unauthorized() {
///         "session expired, log in again"
///     } else if err.is_not_found() {
///         "gone"
///     } else {
///         "something else"
///     }
/// }
/// ```

use reqwest::StatusCode;
use serde::Deserialize;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("API error {status}: {detail}")]
    Api {
        /// HTTP status code of the response
        status: StatusCode,

        /// The server's `detail` message, or the raw body if it had none
        detail: String,
    },

    /// The request never produced a response (DNS, connect, timeout, body)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration problem, e.g. an unparseable base URL
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing the durable token failed
    #[error("token storage error: {0}")]
    TokenStorage(#[from] std::io::Error),

    /// The payload failed client-side validation before any request was sent
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Error body the server sends for failed requests
///
/// `detail` is a string for most errors and a list of field errors for
/// validation failures.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: serde_json::Value,
}

impl ClientError {
    /// Builds an API error from a response status and raw body
    ///
    /// Understands the server's `{"detail": ...}` envelope; anything else is
    /// carried verbatim so nothing is lost.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => match parsed.detail {
                serde_json::Value::String(message) => message,
                other => other.to_string(),
            },
            Err(_) => {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    trimmed.to_string()
                }
            }
        };

        ClientError::Api { status, detail }
    }

    /// HTTP status of the failure, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Whether this is a 401 from the server
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Whether this is a 404 from the server
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
