//! Handlers for redirect lookups.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::Slug;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its target URL.
///
/// # Endpoint
///
/// `GET /{slug}` (and `HEAD`)
///
/// # Response Codes
///
/// - **302 Found**: `Location` holds the stored target
/// - **404 Not Found**: the slug does not exist or is not a valid slug
/// - **500 Internal Server Error**: the store could not be read
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Ok(slug) = Slug::parse(slug) else {
        return Err(AppError::not_found(
            "Nope! Path does not exist.",
            json!({ "reason": "not a valid slug" }),
        ));
    };

    let target = state.redirect_service.resolve(&slug).await?;
    debug!(%slug, url = %target, "Resolved redirect");

    found(&target)
}

/// Redirects the bare root to the configured home URL.
///
/// # Endpoint
///
/// `GET /` (and `HEAD`)
pub async fn home_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    found(&state.home_url)
}

/// Builds a `302 Found` response without panicking on unusable targets.
fn found(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location).map_err(|_| {
        AppError::internal(
            "Nope! Sorry.",
            json!({ "reason": "stored target is not a valid Location header" }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
