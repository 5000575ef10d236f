//! Gateway frame format

use super::{
    CloseCode, HelloPayload, InvalidRequestPayload, OpCode, PostRoomPayload, RoomJoinedPayload,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway frame
///
/// Every frame on the WebSocket connection has this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Event name (only for op=0 Dispatch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayMessage {
    // === Server Messages ===

    /// Create a Dispatch message (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            d: Some(data),
        }
    }

    /// Create a Hello message (op=10)
    #[must_use]
    pub fn hello(payload: HelloPayload) -> Self {
        Self {
            op: OpCode::Hello,
            t: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    /// Create a Heartbeat ACK message (op=11)
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self {
            op: OpCode::HeartbeatAck,
            t: None,
            d: None,
        }
    }

    /// Create a room acknowledgement (op=12)
    #[must_use]
    pub fn room_joined(payload: &PostRoomPayload, joined: bool) -> Self {
        let body = RoomJoinedPayload {
            room: payload.room().name(),
            post_id: payload.post_id,
            group_id: payload.group_id,
            joined,
        };
        Self {
            op: OpCode::RoomJoined,
            t: None,
            d: Some(serde_json::to_value(body).unwrap_or_default()),
        }
    }

    /// Create an InvalidRequest reply (op=13)
    #[must_use]
    pub fn invalid_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        let body = InvalidRequestPayload {
            code: code.into(),
            message: message.into(),
        };
        Self {
            op: OpCode::InvalidRequest,
            t: None,
            d: Some(serde_json::to_value(body).unwrap_or_default()),
        }
    }

    // === Parsing Client Messages ===

    /// Try to parse a join/leave payload (op=2 or op=3)
    pub fn as_post_room(&self) -> Option<PostRoomPayload> {
        if !matches!(self.op, OpCode::JoinPostRoom | OpCode::LeavePostRoom) {
            return None;
        }
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create an error close frame
    #[must_use]
    pub fn close_frame(code: CloseCode) -> (u16, String) {
        (code.as_u16(), code.description().to_string())
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.t {
            Some(t) => write!(f, "GatewayMessage(op={}, t={t})", self.op),
            None => write!(f, "GatewayMessage(op={})", self.op),
        }
    }
}
