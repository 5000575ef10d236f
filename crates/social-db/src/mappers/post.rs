//! Post entity <-> model mapper

use social_core::entities::Post;
use social_core::value_objects::{PostKind, Snowflake};

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            kind: PostKind::from_group(model.group_id.map(Snowflake::new)),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}
