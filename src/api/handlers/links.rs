//! Handlers for redirect management endpoints (create, update, delete).
//!
//! All of them sit behind [`crate::api::middleware::auth`]; by the time they
//! run the request is authorized.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::domain::entities::Slug;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a redirect.
///
/// # Endpoint
///
/// `POST /{slug}` or `PUT /{slug}`
///
/// # Request Body
///
/// The target URL, e.g. `https://example.com/some/page`. Leading and
/// trailing whitespace (such as the newline `curl --data @file` keeps) is
/// trimmed, and the trimmed value is what gets validated and stored.
///
/// # Errors
///
/// Returns 400 Bad Request if the slug or the target is invalid.
/// Returns 409 Conflict if the slug already exists.
pub async fn create_link_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), AppError> {
    let slug = Slug::parse(slug)?;
    let target = target_from_body(&body)?;

    state.redirect_service.create(&slug, target).await?;

    Ok((StatusCode::CREATED, "Created"))
}

/// Points an existing redirect at a new target.
///
/// # Endpoint
///
/// `PATCH /{slug}`
///
/// # Request Body
///
/// The new target URL, trimmed and stored the same way as for creation.
///
/// # Errors
///
/// Returns 400 Bad Request if the slug or the target is invalid.
/// Returns 404 Not Found if the slug does not exist.
pub async fn update_link_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let slug = Slug::parse(slug)?;
    let target = target_from_body(&body)?;

    state.redirect_service.update(&slug, target).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Removes a redirect.
///
/// # Endpoint
///
/// `DELETE /{slug}`
///
/// # Errors
///
/// Returns 400 Bad Request if the slug is invalid.
/// Returns 404 Not Found if the slug does not exist.
pub async fn delete_link_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let slug = Slug::parse(slug)?;

    state.redirect_service.delete(&slug).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Interprets a request body as the target URL, trimmed of surrounding whitespace.
fn target_from_body(body: &[u8]) -> Result<&str, AppError> {
    std::str::from_utf8(body)
        .map(str::trim)
        .map_err(|_| AppError::bad_request("Invalid URL format", json!({ "reason": "body is not valid UTF-8" })))
}
