//! Errors returned by service operations.

use social_cache::RedisPoolError;
use social_common::{AppError, ErrorCategory};
use social_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Rule violation or lookup miss reported by the domain or repositories
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Authentication and infrastructure failures
    #[error(transparent)]
    App(#[from] AppError),

    /// Request shape rejected before reaching the domain
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => ErrorCategory::of_domain(e),
            Self::App(e) => e.category(),
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.category().status()
    }

    /// Most specific code available, e.g. `UNKNOWN_POST`
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RedisPoolError> for ServiceError {
    fn from(err: RedisPoolError) -> Self {
        Self::App(AppError::Cache(err.to_string()))
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
