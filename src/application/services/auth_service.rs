//! Authorization service for mutating requests.

use std::sync::Arc;

use crate::domain::authorizer::Authorizer;
use crate::error::AppError;
use serde_json::json;

/// Service deciding whether a request may create, update or delete redirects.
///
/// Wraps an injected [`Authorizer`] and turns its verdict into an
/// [`AppError::Unauthorized`] the HTTP layer can return directly.
pub struct AuthService {
    authorizer: Arc<dyn Authorizer>,
}

impl AuthService {
    /// Creates a new authorization service.
    pub fn new(authorizer: Arc<dyn Authorizer>) -> Self {
        Self { authorizer }
    }

    /// Checks the credential presented with a request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if no credential was presented or
    /// the authorizer rejects it.
    pub fn authorize(&self, token: Option<&str>) -> Result<(), AppError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            ));
        };

        if !self.authorizer.is_authorized(token) {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or expired one-time password"}),
            ));
        }

        Ok(())
    }
}
