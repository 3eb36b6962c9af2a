use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};

/// GET /
///
/// Points browsers and misconfigured scrapers at `/metrics`.
pub async fn index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/metrics")])
}
