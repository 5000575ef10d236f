//! Domain events - events emitted when post activity changes
//!
//! Every event is scoped to the room of the post it happened under. The
//! service layer publishes them to the fan-out bus and the gateway forwards
//! them to sockets that joined that room.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{PostKind, RoomKey, Snowflake};

/// Wire name of an event as seen by socket clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainEventKind {
    #[serde(rename = "receive-comment")]
    ReceiveComment,
    #[serde(rename = "receive-reply")]
    ReceiveReply,
    #[serde(rename = "commentUpdated")]
    CommentUpdated,
    #[serde(rename = "commentDeleted")]
    CommentDeleted,
    #[serde(rename = "postDeleted")]
    PostDeleted,
}

impl DomainEventKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReceiveComment => "receive-comment",
            Self::ReceiveReply => "receive-reply",
            Self::CommentUpdated => "commentUpdated",
            Self::CommentDeleted => "commentDeleted",
            Self::PostDeleted => "postDeleted",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "receive-comment" => Some(Self::ReceiveComment),
            "receive-reply" => Some(Self::ReceiveReply),
            "commentUpdated" => Some(Self::CommentUpdated),
            "commentDeleted" => Some(Self::CommentDeleted),
            "postDeleted" => Some(Self::PostDeleted),
            _ => None,
        }
    }
}

impl fmt::Display for DomainEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    CommentCreated(CommentCreatedEvent),
    CommentUpdated(CommentUpdatedEvent),
    CommentDeleted(CommentDeletedEvent),
    PostDeleted(PostDeletedEvent),
}

impl DomainEvent {
    /// Socket event this domain event is delivered as
    pub fn kind(&self) -> DomainEventKind {
        match self {
            Self::CommentCreated(e) if e.parent_comment_id.is_some() => {
                DomainEventKind::ReceiveReply
            }
            Self::CommentCreated(_) => DomainEventKind::ReceiveComment,
            Self::CommentUpdated(_) => DomainEventKind::CommentUpdated,
            Self::CommentDeleted(_) => DomainEventKind::CommentDeleted,
            Self::PostDeleted(_) => DomainEventKind::PostDeleted,
        }
    }

    /// Room the event is scoped to
    pub fn room(&self) -> RoomKey {
        match self {
            Self::CommentCreated(e) => RoomKey::for_post(e.post_kind, e.post_id),
            Self::CommentUpdated(e) => RoomKey::for_post(e.post_kind, e.post_id),
            Self::CommentDeleted(e) => RoomKey::for_post(e.post_kind, e.post_id),
            Self::PostDeleted(e) => RoomKey::for_post(e.post_kind, e.post_id),
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::CommentCreated(e) => e.timestamp,
            Self::CommentUpdated(e) => e.timestamp,
            Self::CommentDeleted(e) => e.timestamp,
            Self::PostDeleted(e) => e.timestamp,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreatedEvent {
    pub comment_id: Snowflake,
    pub post_id: Snowflake,
    pub post_kind: PostKind,
    pub parent_comment_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdatedEvent {
    pub comment_id: Snowflake,
    pub post_id: Snowflake,
    pub post_kind: PostKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDeletedEvent {
    pub comment_id: Snowflake,
    pub post_id: Snowflake,
    pub post_kind: PostKind,
    pub parent_comment_id: Option<Snowflake>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDeletedEvent {
    pub post_id: Snowflake,
    pub post_kind: PostKind,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Constructors
// ============================================================================

impl CommentCreatedEvent {
    pub fn new(
        comment_id: Snowflake,
        post_id: Snowflake,
        post_kind: PostKind,
        parent_comment_id: Option<Snowflake>,
        author_id: Snowflake,
    ) -> Self {
        Self {
            comment_id,
            post_id,
            post_kind,
            parent_comment_id,
            author_id,
            timestamp: Utc::now(),
        }
    }
}

impl CommentUpdatedEvent {
    pub fn new(comment_id: Snowflake, post_id: Snowflake, post_kind: PostKind) -> Self {
        Self {
            comment_id,
            post_id,
            post_kind,
            timestamp: Utc::now(),
        }
    }
}

impl CommentDeletedEvent {
    pub fn new(
        comment_id: Snowflake,
        post_id: Snowflake,
        post_kind: PostKind,
        parent_comment_id: Option<Snowflake>,
    ) -> Self {
        Self {
            comment_id,
            post_id,
            post_kind,
            parent_comment_id,
            timestamp: Utc::now(),
        }
    }
}

impl PostDeletedEvent {
    pub fn new(post_id: Snowflake, post_kind: PostKind) -> Self {
        Self {
            post_id,
            post_kind,
            timestamp: Utc::now(),
        }
    }
}
