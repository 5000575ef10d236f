//! Media database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of any of the four media tables
#[derive(Debug, Clone, FromRow)]
pub struct MediaModel {
    pub id: i64,
    pub owner_id: i64,
    pub url: String,
    pub media_type: String,
    pub created_at: DateTime<Utc>,
}
