//! Publisher configuration.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::{TwitterError, TwitterResult};

/// OAuth 2.0 bearer token variable.
pub const ENV_BEARER_TOKEN: &str = "TW_BEARER_TOKEN";
/// OAuth 1.0a consumer key variable.
pub const ENV_API_KEY: &str = "TW_API_KEY";
/// OAuth 1.0a consumer secret variable.
pub const ENV_API_SECRET: &str = "TW_API_SECRET";
/// OAuth 1.0a access token variable.
pub const ENV_ACCESS_TOKEN: &str = "TW_ACCESS_TOKEN";
/// OAuth 1.0a access token secret variable.
pub const ENV_ACCESS_SECRET: &str = "TW_ACCESS_SECRET";
/// Optional API base URL override.
pub const ENV_API_URL: &str = "TW_API_URL";
/// Optional request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "TW_TIMEOUT_SECS";

/// Configuration for the X API client.
#[derive(Clone, Deserialize)]
pub struct TwitterConfig {
    /// OAuth 1.0a Consumer Key (API Key)
    #[serde(default)]
    pub consumer_key: String,

    /// OAuth 1.0a Consumer Secret (API Secret)
    #[serde(default)]
    pub consumer_secret: String,

    /// OAuth 1.0a Access Token
    #[serde(default)]
    pub access_token: String,

    /// OAuth 1.0a Access Token Secret
    #[serde(default)]
    pub access_token_secret: String,

    /// OAuth 2.0 Bearer Token (app-only auth, not accepted for posting)
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Base URL for the X API v2 (default: https://api.twitter.com)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout; unset means no timeout
    #[serde(default, with = "duration_secs")]
    pub timeout: Option<Duration>,
}

fn default_api_url() -> String {
    "https://api.twitter.com".into()
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

impl TwitterConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> TwitterResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing credentials load as empty strings. They are not rejected here;
    /// the provider answers an unsigned or badly signed request with 401.
    pub fn from_lookup<F>(lookup: F) -> TwitterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let missing: Vec<&str> = [
            ENV_API_KEY,
            ENV_API_SECRET,
            ENV_ACCESS_TOKEN,
            ENV_ACCESS_SECRET,
        ]
        .into_iter()
        .filter(|name| get(*name).is_none())
        .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "X credentials not set; the API will reject the request");
        }

        let timeout = get(ENV_TIMEOUT_SECS)
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    TwitterError::Config(format!("invalid {ENV_TIMEOUT_SECS} {raw:?}: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            consumer_key: get(ENV_API_KEY).unwrap_or_default(),
            consumer_secret: get(ENV_API_SECRET).unwrap_or_default(),
            access_token: get(ENV_ACCESS_TOKEN).unwrap_or_default(),
            access_token_secret: get(ENV_ACCESS_SECRET).unwrap_or_default(),
            bearer_token: get(ENV_BEARER_TOKEN),
            api_url: get(ENV_API_URL).unwrap_or_else(default_api_url),
            timeout,
        })
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            access_token: String::new(),
            access_token_secret: String::new(),
            bearer_token: None,
            api_url: default_api_url(),
            timeout: None,
        }
    }
}

impl fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "<unset>" } else { "<redacted>" }
        }

        f.debug_struct("TwitterConfig")
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_token", &redact(&self.access_token))
            .field("access_token_secret", &redact(&self.access_token_secret))
            .field(
                "bearer_token",
                &redact(self.bearer_token.as_deref().unwrap_or_default()),
            )
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Rate limit information from X API headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimitInfo {
    /// Maximum number of requests allowed in the window
    pub limit: Option<u32>,

    /// Remaining requests in the current window
    pub remaining: Option<u32>,

    /// Unix timestamp when the rate limit resets
    pub reset: Option<u64>,
}

impl RateLimitInfo {
    /// Parse rate limit info from response headers.
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let parse = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        Self {
            limit: parse("x-rate-limit-limit").and_then(|v| v.parse().ok()),
            remaining: parse("x-rate-limit-remaining").and_then(|v| v.parse().ok()),
            reset: parse("x-rate-limit-reset").and_then(|v| v.parse().ok()),
        }
    }

    /// Check if the posting window is used up (remaining == 0).
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}
