//! Post kind - distinguishes global posts from group-scoped posts
//!
//! Global and group content is stored in parallel tables. Every operation on
//! posts, comments, media, reactions and likes takes a `PostKind` so a single
//! implementation serves both variants.

use serde::{Deserialize, Serialize};

use super::Snowflake;

/// Scope a post (and everything hanging off it) belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "group_id", rename_all = "snake_case")]
pub enum PostKind {
    /// A post on the global feed
    #[default]
    Global,
    /// A post inside a group
    Group(Snowflake),
}

impl PostKind {
    /// Resolve the kind from an optional group id
    #[inline]
    pub fn from_group(group_id: Option<Snowflake>) -> Self {
        match group_id {
            Some(id) => Self::Group(id),
            None => Self::Global,
        }
    }

    /// Group id for group posts
    #[inline]
    pub fn group_id(&self) -> Option<Snowflake> {
        match self {
            Self::Global => None,
            Self::Group(id) => Some(*id),
        }
    }

    #[inline]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}
