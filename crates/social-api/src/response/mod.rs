//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting.
//!
//! Error bodies use a small set of public codes keyed on the HTTP status;
//! the precise domain code (e.g. `UNKNOWN_POST`) is reported in
//! `details.reason`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use social_common::{AppError, ErrorCategory};
use social_core::DomainError;
use social_service::ServiceError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid media: {0}")]
    InvalidMedia(String),

    #[error("Authentication required")]
    MissingAuth,
}

impl ApiError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::App(e) => e.category(),
            Self::Service(e) => e.category(),
            Self::Domain(e) => ErrorCategory::of_domain(e),
            Self::Validation(_) | Self::BadRequest(_) | Self::InvalidPath(_) | Self::InvalidMedia(_) => {
                ErrorCategory::Validation
            }
            Self::MissingAuth => ErrorCategory::Unauthorized,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.category().status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Public error code: the category, except that path and media
    /// failures get their own codes
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::InvalidMedia(_) => "INVALID_MEDIA",
            Self::Domain(e) | Self::Service(ServiceError::Domain(e)) if is_media_error(e) => {
                "INVALID_MEDIA"
            }
            _ => self.category().as_str(),
        }
    }

    /// Layer-specific code, reported as `details.reason`
    fn reason(&self) -> Option<String> {
        match self {
            Self::App(e) => Some(e.error_code().to_string()),
            Self::Service(e) => Some(e.error_code().to_string()),
            Self::Domain(e) => Some(e.code().to_string()),
            _ => None,
        }
    }

    /// Create a bad request error with a custom message
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid media error
    pub fn invalid_media(msg: impl Into<String>) -> Self {
        Self::InvalidMedia(msg.into())
    }
}

fn is_media_error(e: &DomainError) -> bool {
    matches!(
        e,
        DomainError::UnsupportedMediaType(_)
            | DomainError::MediaTooLarge { .. }
            | DomainError::TooManyFiles { .. }
    )
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        // Server errors are logged in full and answered generically
        let (message, details) = if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
            ("Internal server error".to_string(), None)
        } else if let Self::Validation(errors) = &self {
            (
                self.to_string(),
                Some(serde_json::to_value(errors).unwrap_or_default()),
            )
        } else {
            (
                self.to_string(),
                self.reason().map(|reason| serde_json::json!({ "reason": reason })),
            )
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// Multi-status response (207) for partially applied requests
pub struct MultiStatus<T>(pub T);

impl<T: IntoResponse> IntoResponse for MultiStatus<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::MULTI_STATUS;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
