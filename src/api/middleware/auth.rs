//! Authorization middleware for mutating routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authorizes requests using a one-time password from the Authorization header.
///
/// # Header Format
///
/// Either form is accepted:
///
/// ```text
/// Authorization: Bearer 123456
/// Authorization: 123456
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if the header
/// is missing or the code is rejected by the configured authorizer.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/{slug}", post(create_link_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => raw_authorization(&parts.headers),
    };

    st.auth_service.authorize(token.as_deref())?;

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Reads the Authorization header verbatim, for clients that send the bare code.
fn raw_authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
