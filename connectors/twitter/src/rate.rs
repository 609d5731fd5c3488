//! Exchange-rate value providers.
//!
//! A [`RateSource`] produces the numeric string that gets interpolated into
//! the status text. Only a fixed value ships today.

use async_trait::async_trait;
use tracing::debug;

use crate::error::TwitterResult;

/// Placeholder USD/VES rate published until a live source is wired in.
pub const PLACEHOLDER_RATE: &str = "130.500";

/// Produces the current USD/VES rate as display text.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Return the rate formatted for publication (e.g. `"130.500"`).
    async fn current_rate(&self) -> TwitterResult<String>;
}

/// A rate source that always returns the same value.
#[derive(Debug, Clone)]
pub struct FixedRate {
    value: String,
}

impl FixedRate {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Default for FixedRate {
    fn default() -> Self {
        Self::new(PLACEHOLDER_RATE)
    }
}

#[async_trait]
impl RateSource for FixedRate {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn current_rate(&self) -> TwitterResult<String> {
        debug!(value = %self.value, "Using fixed rate");
        Ok(self.value.clone())
    }
}
