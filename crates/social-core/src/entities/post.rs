//! Post entity - a global or group-scoped post

use chrono::{DateTime, Utc};

use crate::value_objects::{PostKind, RoomKey, Snowflake};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub kind: PostKind,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post
    pub fn new(id: Snowflake, kind: PostKind, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            kind,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Broadcast room for activity under this post
    pub fn room(&self) -> RoomKey {
        RoomKey::for_post(self.kind, self.id)
    }
}
