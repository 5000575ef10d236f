//! Login session storage in Redis.
//!
//! A session maps an opaque random id (the cookie value) to a user id and
//! expires after a sliding TTL. Deleting the key revokes the session for both
//! the cookie and any bearer token issued with it.

use crate::pool::{RedisPool, RedisResult};
use serde::{Deserialize, Serialize};
use social_common::generate_session_id;
use social_core::Snowflake;

/// Key prefix for sessions
const SESSION_PREFIX: &str = "session:";

/// Default session TTL (1 day)
const DEFAULT_SESSION_TTL: u64 = 24 * 60 * 60;

/// Stored session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Logged in user
    pub user_id: Snowflake,
    /// Session creation timestamp (Unix epoch seconds)
    pub created_at: i64,
    /// Client user agent at login (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl SessionData {
    /// Create new session data
    #[must_use]
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
            user_agent: None,
        }
    }

    /// Add user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Session store backing cookie authentication
#[derive(Clone)]
pub struct SessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a new session store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_SESSION_TTL,
        }
    }

    /// Create with custom TTL
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    /// Start a session and return its id
    pub async fn create(&self, data: &SessionData) -> RedisResult<String> {
        let session_id = generate_session_id();
        self.pool
            .set_json(&Self::key(&session_id), data, Some(self.ttl_seconds))
            .await?;

        tracing::debug!(user_id = %data.user_id, "Session created");

        Ok(session_id)
    }

    /// Look up a live session
    pub async fn get(&self, session_id: &str) -> RedisResult<Option<SessionData>> {
        self.pool.get_json(&Self::key(session_id)).await
    }

    /// Extend a session's TTL; returns false if it no longer exists
    pub async fn touch(&self, session_id: &str) -> RedisResult<bool> {
        self.pool.expire(&Self::key(session_id), self.ttl_seconds).await
    }

    /// Destroy a session (logout)
    pub async fn destroy(&self, session_id: &str) -> RedisResult<bool> {
        let deleted = self.pool.delete(&Self::key(session_id)).await?;
        if deleted {
            tracing::debug!("Session destroyed");
        }

        Ok(deleted)
    }
}
