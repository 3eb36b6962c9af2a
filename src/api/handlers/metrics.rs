use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::AppState;

pub const METRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// GET /metrics
///
/// Runs one poll against the device and renders its result together with
/// the collector health metrics.
///
/// The poll runs as its own task: a scraper that hangs up mid-poll drops
/// only the wait, and the device session is still logged out.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let poll_state = state.clone();
    let poll = tokio::spawn(async move {
        let mut poller = poll_state.poller.lock().await;
        tracing::debug!("/metrics polling device");
        poller.poll(&poll_state.metrics).await
    });

    let samples = match poll.await {
        Ok(samples) => samples,
        Err(e) => {
            tracing::error!("Poll task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Poll task failed: {}", e),
            )
                .into_response();
        }
    };

    match state.metrics.render(&samples) {
        Ok(metrics_text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
            metrics_text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}
