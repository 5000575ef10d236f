//! Group database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Group row joined with its member count
#[derive(Debug, Clone, FromRow)]
pub struct GroupListModel {
    #[sqlx(flatten)]
    pub group: GroupModel,
    pub member_count: i64,
}
