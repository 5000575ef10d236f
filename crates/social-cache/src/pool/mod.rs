//! Shared Redis pool used by the session store and the room publisher.

mod redis_pool;

pub use redis_pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};
