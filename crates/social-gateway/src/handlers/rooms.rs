//! Room membership handlers (op 2 `joinPostRoom`, op 3 `leavePostRoom`)

use super::{HandlerError, HandlerResult};
use crate::connection::{Connection, ConnectionManager};
use crate::protocol::{GatewayMessage, PostRoomPayload};
use std::sync::Arc;

/// Handles joining and leaving post rooms
pub struct RoomHandler;

impl RoomHandler {
    /// Put the connection in the post's room and acknowledge
    pub async fn join(
        manager: &ConnectionManager,
        connection: &Arc<Connection>,
        payload: PostRoomPayload,
    ) -> HandlerResult<()> {
        let room = payload.room();
        manager.join_room(connection.id(), room);

        tracing::debug!(connection_id = %connection.id(), room = %room, "joinPostRoom");

        connection
            .send(GatewayMessage::room_joined(&payload, true))
            .await
            .map_err(|_| HandlerError::ConnectionClosed)
    }

    /// Take the connection out of the post's room and acknowledge
    pub async fn leave(
        manager: &ConnectionManager,
        connection: &Arc<Connection>,
        payload: PostRoomPayload,
    ) -> HandlerResult<()> {
        let room = payload.room();
        manager.leave_room(connection.id(), &room);

        tracing::debug!(connection_id = %connection.id(), room = %room, "leavePostRoom");

        connection
            .send(GatewayMessage::room_joined(&payload, false))
            .await
            .map_err(|_| HandlerError::ConnectionClosed)
    }
}
