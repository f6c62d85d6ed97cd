//! storygen-relay - forwards story requests to the generative model
//!
//! Refuses to start without `GOOGLE_AI_KEY`.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use storygen::api::GeminiClient;
use storygen::config::{log_filter, RelayConfig};
use storygen::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .init();

    info!(
        "Starting storygen-relay v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            return Err(e.into());
        }
    };

    let provider = GeminiClient::new(config.provider_url, config.api_key, config.model)?;
    info!("Provider model: {}", provider.model());

    let app = build_router(AppState::new(Arc::new(provider)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("storygen-relay listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
