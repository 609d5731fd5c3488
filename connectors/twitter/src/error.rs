//! Publisher error types.

use thiserror::Error;

/// Errors raised while composing or publishing a status.
#[derive(Error, Debug)]
pub enum TwitterError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// OAuth signature generation failed
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// X API rejected the request
    #[error("X API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
    },

    /// Posting quota or usage cap exhausted (HTTP 429)
    #[error(
        "Rate limited by X API: {message} (reset at {})",
        .reset.map_or_else(|| "unknown".to_string(), |r| r.to_string())
    )]
    RateLimited {
        message: String,
        error_type: Option<String>,
        reset: Option<u64>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TwitterError {
    /// HTTP status reported by the provider, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Whether the failure comes from missing or rejected credentials.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::OAuth(_)) || self.status() == Some(401)
    }
}

/// Result type for publisher operations.
pub type TwitterResult<T> = Result<T, TwitterError>;
