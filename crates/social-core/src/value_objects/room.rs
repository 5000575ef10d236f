//! Room keys - naming scheme for real-time broadcast scopes
//!
//! A room is always named `{kind}:{post_id}`, so a global post and a group
//! post can never share a room even when their ids render the same.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PostKind, Snowflake};

/// Kind prefix of a room name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomKind {
    Post,
    GroupPost,
}

impl RoomKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::GroupPost => "group-post",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "post" => Some(Self::Post),
            "group-post" => Some(Self::GroupPost),
            _ => None,
        }
    }
}

/// Broadcast scope for everything happening under a single post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomKey {
    pub kind: RoomKind,
    pub post_id: Snowflake,
}

impl RoomKey {
    pub const fn new(kind: RoomKind, post_id: Snowflake) -> Self {
        Self { kind, post_id }
    }

    /// Room for a post of the given kind
    pub fn for_post(kind: PostKind, post_id: Snowflake) -> Self {
        let room_kind = match kind {
            PostKind::Global => RoomKind::Post,
            PostKind::Group(_) => RoomKind::GroupPost,
        };
        Self::new(room_kind, post_id)
    }

    /// Render the room name, e.g. `post:42`
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Parse a room name produced by [`RoomKey::name`]
    pub fn parse(name: &str) -> Option<Self> {
        let (prefix, id) = name.split_once(':')?;
        let kind = RoomKind::from_prefix(prefix)?;
        let post_id = Snowflake::parse(id).ok()?;
        Some(Self::new(kind, post_id))
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.post_id)
    }
}
