//! Publishing the daily rate status.

use tracing::{info, instrument};

use crate::{
    client::TwitterApiClient,
    error::{TwitterError, TwitterResult},
    rate::RateSource,
    status::StatusTemplate,
    types::{CreateTweetRequest, CreatedTweet},
};

/// Publishes status text through an explicitly provided API client.
#[derive(Debug)]
pub struct Publisher {
    client: TwitterApiClient,
}

impl Publisher {
    #[must_use]
    pub const fn new(client: TwitterApiClient) -> Self {
        Self { client }
    }

    /// Submit `text` as a new public post.
    ///
    /// Exactly one request is sent. Provider errors are returned unchanged.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn publish(&self, text: &str) -> TwitterResult<CreatedTweet> {
        if text.is_empty() {
            return Err(TwitterError::Config("status text is empty".into()));
        }

        let response = self
            .client
            .create_tweet(&CreateTweetRequest::text(text))
            .await?;

        info!(id = %response.data.id, "Published status");
        Ok(response.data)
    }

    /// Render `template` with the value from `source`, then publish it.
    pub async fn publish_rate(
        &self,
        source: &dyn RateSource,
        template: &StatusTemplate,
    ) -> TwitterResult<CreatedTweet> {
        let value = source.current_rate().await?;
        info!(source = source.name(), %value, "Fetched rate");

        self.publish(&template.render(&value)).await
    }
}
