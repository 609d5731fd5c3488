//! X API v2 wire types for creating a post.

use serde::{Deserialize, Serialize};

/// Create post request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTweetRequest {
    /// Post text
    pub text: String,
}

impl CreateTweetRequest {
    /// A text-only post.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Create post response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTweetResponse {
    /// Created post data
    pub data: CreatedTweet,
}

/// Created post data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTweet {
    /// Provider-assigned post ID
    pub id: String,

    /// Post text as stored by the provider
    pub text: String,

    /// Edit history post IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_history_tweet_ids: Option<Vec<String>>,
}

/// Error body returned by the X API (RFC 7807 problem details).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Error title
    #[serde(default)]
    pub title: Option<String>,

    /// Error detail
    #[serde(default)]
    pub detail: Option<String>,

    /// Error type URI
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,

    /// HTTP status echoed in the body
    #[serde(default)]
    pub status: Option<u16>,
}
