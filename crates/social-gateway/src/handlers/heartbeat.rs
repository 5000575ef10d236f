//! Heartbeat handler (op 1)

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::GatewayMessage;
use std::sync::Arc;

/// Handles heartbeat messages
pub struct HeartbeatHandler;

impl HeartbeatHandler {
    /// Record the heartbeat and acknowledge it
    pub async fn handle(connection: &Arc<Connection>) -> HandlerResult<()> {
        connection.record_heartbeat();

        tracing::trace!(connection_id = %connection.id(), "Heartbeat received");

        connection
            .send(GatewayMessage::heartbeat_ack())
            .await
            .map_err(|_| HandlerError::ConnectionClosed)
    }
}
