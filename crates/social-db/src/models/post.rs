//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of `posts` or `group_posts`
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Always NULL for global posts
    pub group_id: Option<i64>,
}
