//! MaduroDólar X publisher
//!
//! Posts the USD/VES exchange rate to X (Twitter) as a single status update.
//!
//! ## Flow
//!
//! 1. [`TwitterConfig::from_env`] reads the `TW_*` credentials.
//! 2. [`TwitterApiClient::new`] builds an OAuth 1.0a signed client.
//! 3. A [`RateSource`] yields the rate, [`StatusTemplate`] renders the text.
//! 4. [`Publisher::publish`] sends one `POST /2/tweets`.
//!
//! Nothing is retried. Every failure is returned to the caller.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod config;
mod error;
mod oauth;
mod publisher;
mod rate;
mod status;
mod types;

pub use client::TwitterApiClient;
pub use config::{
    ENV_ACCESS_SECRET, ENV_ACCESS_TOKEN, ENV_API_KEY, ENV_API_SECRET, ENV_API_URL,
    ENV_BEARER_TOKEN, ENV_TIMEOUT_SECS, RateLimitInfo, TwitterConfig,
};
pub use error::{TwitterError, TwitterResult};
pub use publisher::Publisher;
pub use rate::{FixedRate, PLACEHOLDER_RATE, RateSource};
pub use status::{DEFAULT_TEMPLATE, StatusTemplate};
pub use types::{CreateTweetRequest, CreateTweetResponse, CreatedTweet};
