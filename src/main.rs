use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use experia_v10_exporter::{
    AppState, Config, DeviceSession, MetricsRegistry, Poller, Result, create_router,
};

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    // Reads .env before the process environment
    let config = Config::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;

    tracing::info!(
        "Monitoring Experia Box at {} as user '{}' (timeout {:?})",
        config.device.address,
        config.device.username,
        config.device.timeout
    );
    tracing::debug!("Scrape policy: {:?}", config.policy);

    let listen_addr = config.listen_addr;
    let session = DeviceSession::new(config.device)?;
    let poller = Poller::new(session, config.policy);
    let state = Arc::new(AppState::new(MetricsRegistry::new(), poller));

    // Graceful shutdown channel
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .map_err(|e| {
            tracing::error!("Failed to bind address: {}", e);
            e
        })?;

    tracing::info!("Experia V10 Exporter starting on {}", listen_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /        - Redirect to /metrics");
    tracing::info!("  - GET /health  - Health check");
    tracing::info!("  - GET /metrics - Poll device, Prometheus metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            tracing::info!("HTTP server shutting down");
        })
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

fn setup_tracing() {
    // RUST_LOG wins; "info" otherwise
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
