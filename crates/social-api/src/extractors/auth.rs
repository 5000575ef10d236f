//! Authentication extractors
//!
//! Credentials are resolved on every request: the session cookie first,
//! then an `Authorization: Bearer` token for non-browser clients. When the
//! cookie's session is gone but a bearer token is present, the token decides.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use social_core::{Snowflake, User};
use social_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Credentials carried by a request
#[derive(Debug, Clone)]
struct Credentials {
    session_id: Option<String>,
    bearer: Option<String>,
}

async fn credentials<S>(parts: &mut Parts, state: &S) -> Result<Credentials, ApiError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    let app_state = AppState::from_ref(state);

    let session_id = CookieJar::from_headers(&parts.headers)
        .get(app_state.cookie_name())
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty());

    let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

    if session_id.is_none() && bearer.is_none() {
        return Err(ApiError::MissingAuth);
    }

    Ok(Credentials { session_id, bearer })
}

/// Authenticated user resolved from the session cookie or a bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Snowflake,
    pub user: User,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user: User) -> Self {
        Self {
            user_id: user.id,
            user,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let credentials = credentials(parts, state).await?;
        let app_state = AppState::from_ref(state);
        let service = AuthService::new(app_state.service_context());

        let by_cookie = match &credentials.session_id {
            Some(session_id) => Some(service.authenticate_session(session_id).await),
            None => None,
        };

        // a stale cookie must not hide a valid bearer token
        let user = match (by_cookie, &credentials.bearer) {
            (Some(Ok(user)), _) => Ok(user),
            (_, Some(token)) => service.authenticate_token(token).await,
            (Some(Err(e)), None) => Err(e),
            (None, None) => return Err(ApiError::MissingAuth),
        }
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected credentials");
            ApiError::from(e)
        })?;

        Ok(AuthUser::new(user))
    }
}

/// Session id behind the request's credentials
///
/// Does not check that the session is still alive; used by logout and the
/// session status endpoint.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let credentials = credentials(parts, state).await?;
        match (credentials.session_id, credentials.bearer) {
            (Some(session_id), _) => Ok(SessionId(session_id)),
            (None, Some(token)) => {
                let app_state = AppState::from_ref(state);
                let claims = app_state.jwt_service().validate(&token).map_err(|e| {
                    tracing::warn!(error = %e, "Invalid access token");
                    ApiError::from(e)
                })?;
                Ok(SessionId(claims.sid))
            }
            (None, None) => Err(ApiError::MissingAuth),
        }
    }
}
