//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and
//! multipart uploads.

mod auth;
mod multipart;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, SessionId};
pub use multipart::{MediaForm, MEDIA_FIELD};
pub use pagination::{Pagination, Scope};
pub use path::{GroupPostPath, SnowflakePath};
pub use validated::{JsonBody, ValidatedJson};
