//! Reaction and like database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of `post_reactions` or `group_post_reactions`
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub post_id: i64,
    pub user_id: i64,
    pub emoji: String,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated like counts per comment
#[derive(Debug, Clone, FromRow)]
pub struct LikeSummaryModel {
    pub comment_id: i64,
    pub count: i64,
    pub me: bool,
}
