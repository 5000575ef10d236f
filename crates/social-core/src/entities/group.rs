//! Group entity and membership

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Group entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new Group
    pub fn new(
        id: Snowflake,
        name: String,
        description: Option<String>,
        creator_id: Snowflake,
    ) -> Self {
        Self {
            id,
            name,
            description,
            creator_id,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_creator(&self, user_id: Snowflake) -> bool {
        self.creator_id == user_id
    }
}

/// Membership row: presence means the user belongs to the group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub group_id: Snowflake,
    pub user_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl GroupMember {
    pub fn new(group_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            group_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}
