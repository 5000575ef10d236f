//! Media entity - an uploaded file attached to a post or comment

use chrono::{DateTime, Utc};

use crate::value_objects::{MediaKind, Snowflake};

/// Media item owned by exactly one post or comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub url: String,
    pub media_type: MediaKind,
    pub created_at: DateTime<Utc>,
}

impl Media {
    /// Create a new Media
    pub fn new(id: Snowflake, owner_id: Snowflake, url: String, media_type: MediaKind) -> Self {
        Self {
            id,
            owner_id,
            url,
            media_type,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_video(&self) -> bool {
        self.media_type == MediaKind::Video
    }
}
