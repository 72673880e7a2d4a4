//! Redirect route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, home_handler, redirect_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes anyone may call.
///
/// # Endpoints
///
/// - `GET /`                   - Redirect to the configured home URL
/// - `GET /.well-known/health` - Health check
/// - `GET /{slug}`             - Redirect to the slug's target
///
/// `HEAD` is answered for every `GET` route.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/.well-known/health", get(health_handler))
        .route("/{slug}", get(redirect_handler))
}

/// Routes that change redirects; callers must add authorization.
///
/// # Endpoints
///
/// - `POST   /{slug}` - Create a redirect (body: target URL)
/// - `PUT    /{slug}` - Same as `POST`
/// - `PATCH  /{slug}` - Change the target of a redirect (body: target URL)
/// - `DELETE /{slug}` - Remove a redirect
pub fn protected_routes() -> Router<AppState> {
    Router::new().route(
        "/{slug}",
        post(create_link_handler)
            .put(create_link_handler)
            .patch(update_link_handler)
            .delete(delete_link_handler),
    )
}
