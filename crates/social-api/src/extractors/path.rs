//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters. Malformed
//! ids are rejected with `INVALID_PATH`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};
use social_core::Snowflake;

use crate::response::ApiError;

/// Extract path parameters, mapping rejections to `INVALID_PATH`
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(SnowflakePath(inner))
    }
}

/// Path parameters for a post inside a group
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GroupPostPath {
    pub group_id: Snowflake,
    pub post_id: Snowflake,
}
