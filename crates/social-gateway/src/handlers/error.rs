//! Handler error types

use crate::protocol::OpCode;
use thiserror::Error;

/// Handler error type
///
/// Every variant is answered with an InvalidRequest frame; none closes the socket.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame was not valid JSON or not a gateway frame
    #[error("Malformed frame: {0}")]
    Decode(String),

    /// Payload did not match the op code
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Op code only the server may send
    #[error("Op code {0} cannot be sent by clients")]
    UnexpectedOp(OpCode),

    /// Outbound queue is gone
    #[error("Connection closed")]
    ConnectionClosed,
}

impl HandlerError {
    /// Machine-readable code carried in the InvalidRequest payload
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DECODE_ERROR",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::UnexpectedOp(_) => "UNKNOWN_OPCODE",
            Self::ConnectionClosed => "CONNECTION_CLOSED",
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
