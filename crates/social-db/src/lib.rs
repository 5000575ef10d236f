//! # social-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `social-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - The global/group table adapter ([`tables::TableSet`])
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_db::{create_pool, run_migrations, PoolConfig, PgPostRepository};
//! use social_core::{PostKind, PostRepository, Snowflake};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!
//!     let posts = PgPostRepository::new(pool);
//!     let post = posts.find_by_id(PostKind::Global, Snowflake::new(42)).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod tables;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCommentRepository, PgGroupRepository, PgLikeRepository, PgMediaRepository,
    PgPostRepository, PgReactionRepository, PgUserRepository,
};
pub use tables::TableSet;
