use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::entities::SlugError;
use crate::domain::repositories::StoreError;
use crate::utils::url_validator::UrlValidationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(slug) => {
                AppError::not_found("Nope! Path does not exist.", json!({ "slug": slug.as_str() }))
            }
            StoreError::AlreadyExists(slug) => AppError::conflict(
                "Nope! Path already exists.",
                json!({ "slug": slug.as_str() }),
            ),
            StoreError::Io { slug, source } => {
                tracing::error!(%slug, error = %source, "Storage I/O failed");
                AppError::internal("Nope! Sorry.", json!({ "slug": slug.as_str() }))
            }
        }
    }
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": e.to_string(), "expected": "absolute URL with scheme and host" }),
        )
    }
}

impl From<SlugError> for AppError {
    fn from(e: SlugError) -> Self {
        AppError::bad_request("Invalid path", json!({ "reason": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Slug;

    fn slug() -> Slug {
        Slug::parse("abc").unwrap()
    }

    #[test]
    fn test_store_errors_map_to_statuses() {
        let not_found: AppError = StoreError::NotFound(slug()).into();
        let conflict: AppError = StoreError::AlreadyExists(slug()).into();
        let io: AppError = StoreError::Io {
            slug: slug(),
            source: std::io::Error::other("disk full"),
        }
        .into();

        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_error_details_do_not_leak_source() {
        let io: AppError = StoreError::Io {
            slug: slug(),
            source: std::io::Error::other("/home/user/.GRY/abc: permission denied"),
        }
        .into();

        let info = io.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert!(!info.details.to_string().contains("permission denied"));
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let invalid_url: AppError = UrlValidationError::InvalidFormat.into();
        let invalid_slug: AppError = SlugError::Empty.into();

        assert_eq!(invalid_url.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid_slug.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_response_has_challenge() {
        let response = AppError::unauthorized("Unauthorized", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
