//! Reaction and like entities

use chrono::{DateTime, Utc};

use crate::value_objects::{PostKind, Snowflake};

/// Emoji reaction on a post; at most one per (post, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub kind: PostKind,
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(kind: PostKind, post_id: Snowflake, user_id: Snowflake, emoji: String) -> Self {
        Self {
            kind,
            post_id,
            user_id,
            emoji,
            updated_at: Utc::now(),
        }
    }
}

/// Aggregated likes for one comment or reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeSummary {
    pub comment_id: Snowflake,
    pub count: i64,
    pub me: bool,
}
