//! Comment entity <-> model mapper

use social_core::entities::Comment;
use social_core::value_objects::{PostKind, Snowflake};

use crate::models::CommentModel;

impl CommentModel {
    /// Convert a row read from the tables of `kind`
    pub fn into_comment(self, kind: PostKind) -> Comment {
        Comment {
            id: Snowflake::new(self.id),
            kind,
            post_id: Snowflake::new(self.post_id),
            author_id: Snowflake::new(self.author_id),
            content: self.content,
            parent_comment_id: self.parent_comment_id.map(Snowflake::new),
            created_at: self.created_at,
            edited_at: self.edited_at,
        }
    }
}
