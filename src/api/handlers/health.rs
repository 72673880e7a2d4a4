//! Handler for the health check endpoint.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Reports whether the service can reach its redirect store.
///
/// # Endpoint
///
/// `GET /.well-known/health` (and `HEAD`)
///
/// # Response Codes
///
/// - **200 OK**: body `OK`
/// - **503 Service Unavailable**: the store is not usable
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.redirect_service.is_healthy().await {
        (StatusCode::OK, "OK")
    } else {
        tracing::warn!("Health check failed: redirect store unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
    }
}
