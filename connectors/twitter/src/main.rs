//! MaduroDólar X publisher - Main entrypoint
//!
//! Reads the `TW_*` credentials from the environment, composes the daily rate
//! status and publishes it once. Takes no arguments.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use madurodolar_twitter::{FixedRate, Publisher, StatusTemplate, TwitterApiClient, TwitterConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TwitterConfig::from_env().context("Failed to load X configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let client = TwitterApiClient::new(&config).context("Failed to build X API client")?;
    let publisher = Publisher::new(client);

    let tweet = publisher
        .publish_rate(&FixedRate::default(), &StatusTemplate::default())
        .await
        .context("Failed to publish status to X")?;

    println!("Posted to X: {}", serde_json::to_string(&tweet)?);

    Ok(())
}
