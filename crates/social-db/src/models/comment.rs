//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of `comments` or `group_comments`
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub parent_comment_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl CommentModel {
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }
}
