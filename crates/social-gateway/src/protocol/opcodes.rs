//! Frame operation codes.
//!
//! Codes below 10 travel client to server (except `Dispatch`), codes from 10
//! up are server replies. On the wire an op is a bare JSON integer.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum OpCode {
    /// Room event forwarded from the bus
    Dispatch = 0,
    Heartbeat = 1,
    /// `d` is `{"post_id", "group_id"?}`
    JoinPostRoom = 2,
    LeavePostRoom = 3,
    /// First frame on every socket, carries the heartbeat interval
    Hello = 10,
    HeartbeatAck = 11,
    /// Acknowledges both joins and leaves
    RoomJoined = 12,
    InvalidRequest = 13,
}

impl OpCode {
    /// Ops a client is allowed to send
    #[must_use]
    pub const fn is_client_op(self) -> bool {
        matches!(self, Self::Heartbeat | Self::JoinPostRoom | Self::LeavePostRoom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid op code: {0}")]
pub struct UnknownOpCode(pub u8);

impl TryFrom<u8> for OpCode {
    type Error = UnknownOpCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Dispatch,
            1 => Self::Heartbeat,
            2 => Self::JoinPostRoom,
            3 => Self::LeavePostRoom,
            10 => Self::Hello,
            11 => Self::HeartbeatAck,
            12 => Self::RoomJoined,
            13 => Self::InvalidRequest,
            other => return Err(UnknownOpCode(other)),
        })
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} ({})", u8::from(*self))
    }
}
