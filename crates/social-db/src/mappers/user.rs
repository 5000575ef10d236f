//! User entity <-> model mapper

use social_core::entities::User;
use social_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            display_name: model.display_name,
            profile_picture: model.profile_picture,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
