//! Gateway protocol definitions
//!
//! Op codes, frame layout, payloads and close codes.

mod close_codes;
mod messages;
mod opcodes;
mod payloads;

pub use close_codes::CloseCode;
pub use messages::GatewayMessage;
pub use opcodes::{OpCode, UnknownOpCode};
pub use payloads::{
    HelloPayload, InvalidRequestPayload, PostRoomPayload, RoomJoinedPayload,
    DEFAULT_HEARTBEAT_INTERVAL_MS,
};
