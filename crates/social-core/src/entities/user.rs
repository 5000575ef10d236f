//! User entity - represents a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            display_name: None,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown next to posts and comments
    pub fn visible_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Update the display name
    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    /// Update the profile picture path
    pub fn set_profile_picture(&mut self, path: Option<String>) {
        self.profile_picture = path;
        self.updated_at = Utc::now();
    }
}
