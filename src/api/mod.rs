//! HTTP API module for the Experia V10 exporter
//!
//! Provides REST API endpoints for health checks and Prometheus metrics export.
//!
//! # Endpoints
//! - `GET /` — redirect to `/metrics`
//! - `GET /health` — health check
//! - `GET /metrics` — poll the device and render Prometheus metrics

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::collector::Poller;
use crate::metrics::MetricsRegistry;

/// Application state shared with endpoints
///
/// The poller sits behind a mutex so concurrent scrapes run their polls
/// one after another against the single device session.
pub struct AppState {
    pub metrics: MetricsRegistry,
    pub poller: Mutex<Poller>,
}

impl AppState {
    #[must_use]
    pub fn new(metrics: MetricsRegistry, poller: Poller) -> Self {
        Self {
            metrics,
            poller: Mutex::new(poller),
        }
    }
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
