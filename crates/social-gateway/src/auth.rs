//! Credential check run before a socket is upgraded.
//!
//! Rooms carry comment bodies, group posts included, so a socket needs the
//! same credentials as the REST API: the session cookie, or a bearer token
//! whose session is still alive. A stale cookie does not shadow a valid
//! bearer token.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use axum_extra::extract::CookieJar;
use social_cache::SessionStore;
use social_common::{AppError, JwtService};
use social_core::Snowflake;
use std::sync::Arc;

/// Credentials found on an upgrade request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketCredentials {
    pub session_id: Option<String>,
    pub bearer: Option<String>,
}

impl SocketCredentials {
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        let session_id = CookieJar::from_headers(headers)
            .get(cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Self { session_id, bearer }
    }
}

/// Where live sessions are looked up
#[async_trait]
pub trait SessionLookup: Send + Sync {
    /// Owner of a live session, `None` once it expired or was revoked
    async fn session_user(&self, session_id: &str) -> Result<Option<Snowflake>, AppError>;
}

#[async_trait]
impl SessionLookup for SessionStore {
    async fn session_user(&self, session_id: &str) -> Result<Option<Snowflake>, AppError> {
        self.get(session_id)
            .await
            .map(|session| session.map(|s| s.user_id))
            .map_err(|e| AppError::Cache(e.to_string()))
    }
}

pub struct SocketAuthenticator {
    sessions: Arc<dyn SessionLookup>,
    jwt: JwtService,
}

impl SocketAuthenticator {
    pub fn new(sessions: Arc<dyn SessionLookup>, jwt: JwtService) -> Self {
        Self { sessions, jwt }
    }

    /// Resolve the user behind a request: cookie first, then bearer token
    pub async fn authenticate(&self, credentials: &SocketCredentials) -> Result<Snowflake, AppError> {
        let by_cookie = match &credentials.session_id {
            Some(session_id) => Some(self.by_session(session_id).await),
            None => None,
        };

        match (by_cookie, &credentials.bearer) {
            (Some(Ok(user_id)), _) => Ok(user_id),
            (_, Some(token)) => self.by_bearer(token).await,
            (Some(Err(e)), None) => Err(e),
            (None, None) => Err(AppError::InvalidToken),
        }
    }

    async fn by_session(&self, session_id: &str) -> Result<Snowflake, AppError> {
        self.sessions
            .session_user(session_id)
            .await?
            .ok_or(AppError::SessionExpired)
    }

    async fn by_bearer(&self, token: &str) -> Result<Snowflake, AppError> {
        let claims = self.jwt.validate(token)?;
        let user_id = claims.user_id()?;
        if self.by_session(&claims.sid).await? != user_id {
            return Err(AppError::InvalidToken);
        }
        Ok(user_id)
    }
}

impl std::fmt::Debug for SocketAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketAuthenticator").finish_non_exhaustive()
    }
}
