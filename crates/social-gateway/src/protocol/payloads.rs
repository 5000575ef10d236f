//! Payload bodies carried in the `d` field

use serde::{Deserialize, Serialize};
use social_core::{PostKind, RoomKey, Snowflake};

/// Default heartbeat interval when none is configured
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 41_250;

/// Hello payload (op=10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Interval in milliseconds the client should heartbeat with
    pub heartbeat_interval: u64,
}

impl HelloPayload {
    #[must_use]
    pub const fn new(heartbeat_interval: u64) -> Self {
        Self { heartbeat_interval }
    }
}

impl Default for HelloPayload {
    fn default() -> Self {
        Self::new(DEFAULT_HEARTBEAT_INTERVAL_MS)
    }
}

/// Join/leave payload (op=2 `joinPostRoom`, op=3 `leavePostRoom`)
///
/// `group_id` selects the group-post room; without it the global post room is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRoomPayload {
    pub post_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Snowflake>,
}

impl PostRoomPayload {
    /// Room this payload addresses
    #[must_use]
    pub fn room(&self) -> RoomKey {
        RoomKey::for_post(PostKind::from_group(self.group_id), self.post_id)
    }
}

/// Acknowledgement for a join or leave (op=12)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomJoinedPayload {
    pub room: String,
    pub post_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Snowflake>,
    pub joined: bool,
}

/// Error reply for a frame the gateway could not handle (op=13)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRequestPayload {
    pub code: String,
    pub message: String,
}
