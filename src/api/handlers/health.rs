use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Health check endpoint response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
///
/// Liveness of the exporter process only; the device is not contacted.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
