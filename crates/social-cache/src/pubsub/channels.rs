//! Pub/Sub channel definitions.
//!
//! Defines the channel naming conventions for Redis Pub/Sub.

use social_core::RoomKey;

/// Channel prefix for room events
pub const ROOM_CHANNEL_PREFIX: &str = "social:room:";

/// Pattern matching every room channel
pub const ROOM_CHANNEL_PATTERN: &str = "social:room:*";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Events for everyone viewing a post
    Room(RoomKey),
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    /// Create a room channel
    #[must_use]
    pub fn room(room: RoomKey) -> Self {
        Self::Room(room)
    }

    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Room(room) => format!("{ROOM_CHANNEL_PREFIX}{room}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// The room this channel carries, if any
    #[must_use]
    pub fn as_room(&self) -> Option<RoomKey> {
        match self {
            Self::Room(room) => Some(*room),
            Self::Custom(_) => None,
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        name.strip_prefix(ROOM_CHANNEL_PREFIX)
            .and_then(RoomKey::parse)
            .map_or_else(|| Self::Custom(name.to_string()), Self::Room)
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
