//! Query string extractors
//!
//! Cursor pagination for feeds and the optional `group_id` scope used by
//! comment and reaction endpoints.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use social_service::{GroupScope, PaginationQuery};
use validator::Validate;

use crate::response::ApiError;

/// Validated `?before=&limit=` parameters
#[derive(Debug, Clone, Default)]
pub struct Pagination(pub PaginationQuery);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        query.validate()?;

        Ok(Pagination(query))
    }
}

/// `?group_id=` selecting group tables
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope(pub GroupScope);

#[async_trait]
impl<S> FromRequestParts<S> for Scope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(scope) = Query::<GroupScope>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Ok(Scope(scope))
    }
}
