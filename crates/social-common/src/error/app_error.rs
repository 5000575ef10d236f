//! Application error type shared by the service and API layers.
//!
//! Every error falls into one [`ErrorCategory`], which fixes both the HTTP
//! status and the public `code` of the error body. The finer-grained
//! [`AppError::error_code`] travels alongside as the reason.

use social_core::DomainError;

/// Coarse error class exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    Internal,
}

impl ErrorCategory {
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::RateLimited => 429,
            Self::Internal => 500,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::RateLimited => "RATE_LIMITED",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Business-rule violations such as an owner leaving their own group
    /// are reported as validation failures.
    #[must_use]
    pub fn of_domain(err: &DomainError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else if err.is_authorization() {
            Self::Forbidden
        } else if err.is_validation() || err.is_business_rule() {
            Self::Validation
        } else if err.is_conflict() {
            Self::Conflict
        } else {
            Self::Internal
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Session expired or revoked")]
    SessionExpired,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::SessionExpired => ErrorCategory::Unauthorized,
            Self::InsufficientPermissions => ErrorCategory::Forbidden,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Conflict(_) => ErrorCategory::Conflict,
            Self::Database(_) | Self::Cache(_) | Self::Config(_) | Self::Internal(_) => {
                ErrorCategory::Internal
            }
            Self::Domain(e) => ErrorCategory::of_domain(e),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.category().status()
    }

    /// Specific code for logs and the `reason` field of error bodies
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
