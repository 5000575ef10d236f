//! Group entity <-> model mapper

use social_core::entities::Group;
use social_core::value_objects::Snowflake;

use crate::models::{GroupListModel, GroupModel};

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            creator_id: Snowflake::new(model.creator_id),
            created_at: model.created_at,
        }
    }
}

impl From<GroupListModel> for (Group, i64) {
    fn from(model: GroupListModel) -> Self {
        (Group::from(model.group), model.member_count)
    }
}
