//! Op code handlers
//!
//! Routes incoming client frames by operation code.

mod error;
mod heartbeat;
mod rooms;

pub use error::{HandlerError, HandlerResult};
pub use heartbeat::HeartbeatHandler;
pub use rooms::RoomHandler;

use crate::connection::{Connection, ConnectionManager};
use crate::protocol::{GatewayMessage, OpCode};
use std::sync::Arc;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Parse a text frame and handle it
    ///
    /// Failures are reported back on the connection as InvalidRequest; only a
    /// closed outbound queue is returned as an error.
    pub async fn handle_text(
        manager: &ConnectionManager,
        connection: &Arc<Connection>,
        text: &str,
    ) -> HandlerResult<()> {
        let result = match GatewayMessage::from_json(text) {
            Ok(message) => Self::dispatch(manager, connection, message).await,
            Err(e) => Err(HandlerError::Decode(e.to_string())),
        };

        match result {
            Err(HandlerError::ConnectionClosed) => Err(HandlerError::ConnectionClosed),
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection.id(),
                    error = %e,
                    "Rejected client frame"
                );
                connection
                    .send(GatewayMessage::invalid_request(e.code(), e.to_string()))
                    .await
                    .map_err(|_| HandlerError::ConnectionClosed)
            }
            Ok(()) => Ok(()),
        }
    }

    /// Handle an incoming client message
    pub async fn dispatch(
        manager: &ConnectionManager,
        connection: &Arc<Connection>,
        message: GatewayMessage,
    ) -> HandlerResult<()> {
        if !message.op.is_client_op() {
            tracing::warn!(
                connection_id = %connection.id(),
                op = %message.op,
                "Received server-only op code from client"
            );
            return Err(HandlerError::UnexpectedOp(message.op));
        }

        match message.op {
            OpCode::Heartbeat => HeartbeatHandler::handle(connection).await,
            OpCode::JoinPostRoom => {
                let payload = message.as_post_room().ok_or_else(|| {
                    HandlerError::InvalidPayload("joinPostRoom requires a numeric post_id".to_string())
                })?;

                RoomHandler::join(manager, connection, payload).await
            }
            OpCode::LeavePostRoom => {
                let payload = message.as_post_room().ok_or_else(|| {
                    HandlerError::InvalidPayload("leavePostRoom requires a numeric post_id".to_string())
                })?;

                RoomHandler::leave(manager, connection, payload).await
            }
            other => Err(HandlerError::UnexpectedOp(other)),
        }
    }
}
