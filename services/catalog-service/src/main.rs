use anyhow::Result;
use common::telemetry::{init_telemetry, shutdown_telemetry, TelemetryConfig};
use common::AppConfig;
use std::net::SocketAddr;

mod handlers;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    init_telemetry(TelemetryConfig::for_service("catalog-service", &config))
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Starting Catalog Service...");
    tracing::info!("Configuration:");
    tracing::info!("  Storage backend: {:?}", config.storage);
    tracing::info!("  Cache backend: {:?}", config.cache.backend);
    tracing::info!("  Cache TTL: {} seconds", config.cache.ttl_seconds);
    tracing::info!("  Event cadence: {} ms", config.event_cadence_ms);
    tracing::info!("  Seed data: {}", config.seed_data);
    tracing::info!("  Port: {}", config.port);

    let state = AppState::new(&config).await?;

    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Catalog service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    shutdown_telemetry();

    Ok(())
}
