//! # social-cache
//!
//! Redis layer for login sessions and room pub/sub.
//!
//! Login sessions live under `session:<id>` with a sliding TTL. Room events
//! are published on `social:room:<room>` and picked up by every gateway
//! through a single pattern subscription.
//!
//! ## Example
//!
//! ```ignore
//! use social_cache::{Publisher, RedisPool, RedisPoolConfig, SessionData, SessionStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = SessionStore::with_ttl(pool.clone(), 86_400);
//! let publisher = Publisher::new(pool);
//!
//! let session_id = sessions.create(&SessionData::new(user_id)).await?;
//! publisher.publish_to_room(room, "receive-comment", &comment).await?;
//! ```

pub mod pool;
pub mod pubsub;
pub mod session;

pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

pub use session::{SessionData, SessionStore};

pub use pubsub::{
    PubSubChannel, PubSubEvent, Publisher, ReceivedMessage, Subscriber, SubscriberConfig,
    SubscriberError, SubscriberResult, ROOM_CHANNEL_PATTERN, ROOM_CHANNEL_PREFIX,
};
