//! Roster server binary.

use std::sync::Arc;

use roster::{serve, AppState, ServiceConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    let state = Arc::new(AppState::open(&config)?);

    serve(&config, state).await?;
    Ok(())
}
