//! Media entity <-> model mapper

use social_core::entities::Media;
use social_core::error::DomainError;
use social_core::value_objects::{MediaKind, Snowflake};

use crate::models::MediaModel;

impl TryFrom<MediaModel> for Media {
    type Error = DomainError;

    fn try_from(model: MediaModel) -> Result<Self, Self::Error> {
        let media_type = MediaKind::parse(&model.media_type).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown media type: {}", model.media_type))
        })?;

        Ok(Media {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            url: model.url,
            media_type,
            created_at: model.created_at,
        })
    }
}
