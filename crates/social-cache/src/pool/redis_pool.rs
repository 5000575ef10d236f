//! deadpool-redis wrapper with JSON value helpers.

use std::sync::Arc;

use deadpool_redis::{Config, Pool, PoolConfig, Runtime};
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

/// Connection settings for [`RedisPool`]
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    pub url: String,
    pub max_connections: usize,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_connections: 16,
        }
    }
}

impl From<&social_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &social_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(#[from] deadpool_redis::CreatePoolError),

    #[error("Redis pool exhausted or unreachable: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TTL out of range: {0}")]
    InvalidTtl(u64),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Cloneable handle to the Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

/// Strip `user:password@` from a Redis URL before it reaches the logs
fn redact(url: &str) -> &str {
    url.rsplit_once('@').map_or(url, |(_, host)| host)
}

impl RedisPool {
    /// Build the pool. No connection is opened until the first checkout.
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let mut cfg = Config::from_url(config.url.as_str());
        cfg.pool = Some(PoolConfig::new(config.max_connections));
        let pool = cfg.create_pool(Some(Runtime::Tokio1))?;

        tracing::info!(
            url = %redact(&config.url),
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_config(config: &social_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    /// Check out a connection
    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    /// PING round trip, used by the readiness probe
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Store `value` as JSON, expiring after `ttl_seconds` when given
    pub async fn set_json<V: Serialize>(
        &self,
        key: &str,
        value: &V,
        ttl_seconds: Option<u64>,
    ) -> RedisResult<()> {
        let encoded = serde_json::to_string(value)?;
        let mut conn = self.get().await?;
        if let Some(ttl) = ttl_seconds {
            conn.set_ex::<_, _, ()>(key, encoded, ttl).await?;
        } else {
            conn.set::<_, _, ()>(key, encoded).await?;
        }
        Ok(())
    }

    /// Load and decode a JSON value; `None` when the key is missing
    pub async fn get_json<V: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<V>> {
        let mut conn = self.get().await?;
        let raw: Option<String> = conn.get(key).await?;
        raw.map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(RedisPoolError::from)
    }

    /// Remove a key; true if it existed
    pub async fn delete(&self, key: &str) -> RedisResult<bool> {
        let mut conn = self.get().await?;
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    /// Reset the TTL of an existing key; false if the key is gone
    pub async fn expire(&self, key: &str, ttl_seconds: u64) -> RedisResult<bool> {
        let ttl = i64::try_from(ttl_seconds).map_err(|_| RedisPoolError::InvalidTtl(ttl_seconds))?;
        let mut conn = self.get().await?;
        Ok(conn.expire(key, ttl).await?)
    }
}

pub type SharedRedisPool = Arc<RedisPool>;

pub fn create_shared_pool(config: RedisPoolConfig) -> RedisResult<SharedRedisPool> {
    RedisPool::new(config).map(Arc::new)
}
