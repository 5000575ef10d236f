//! Comment entity - a comment on a post, or a reply to a comment

use chrono::{DateTime, Utc};

use crate::value_objects::{PostKind, RoomKey, Snowflake};

/// Comment entity
///
/// A comment with a `parent_comment_id` is a reply. Replies nest one level
/// deep: the parent is always a top-level comment on the same post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub kind: PostKind,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub parent_comment_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a new top-level comment
    pub fn new(
        id: Snowflake,
        kind: PostKind,
        post_id: Snowflake,
        author_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            kind,
            post_id,
            author_id,
            content,
            parent_comment_id: None,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    /// Create a reply to `parent_comment_id`
    pub fn new_reply(
        id: Snowflake,
        kind: PostKind,
        post_id: Snowflake,
        author_id: Snowflake,
        content: String,
        parent_comment_id: Snowflake,
    ) -> Self {
        Self {
            parent_comment_id: Some(parent_comment_id),
            ..Self::new(id, kind, post_id, author_id, content)
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Replace the content and stamp the edit time
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.edited_at = Some(Utc::now());
    }

    /// Broadcast room of the post this comment belongs to
    pub fn room(&self) -> RoomKey {
        RoomKey::for_post(self.kind, self.post_id)
    }
}
