//! Individual WebSocket connection

use crate::protocol::GatewayMessage;
use parking_lot::{Mutex, RwLock};
use social_core::RoomKey;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// A single WebSocket connection
///
/// Outbound frames go through a bounded channel drained by the socket's send task.
pub struct Connection {
    /// Unique connection ID
    id: String,

    /// Channel to the send task
    sender: mpsc::Sender<GatewayMessage>,

    /// Last heartbeat received
    last_heartbeat: Mutex<Instant>,

    /// Rooms this connection joined
    rooms: RwLock<HashSet<RoomKey>>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(id: String, sender: mpsc::Sender<GatewayMessage>) -> Arc<Self> {
        Arc::new(Self {
            id,
            sender,
            last_heartbeat: Mutex::new(Instant::now()),
            rooms: RwLock::new(HashSet::new()),
            created_at: Instant::now(),
        })
    }

    /// Get the connection ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record a heartbeat received
    pub fn record_heartbeat(&self) {
        *self.last_heartbeat.lock() = Instant::now();
    }

    /// Get time since last heartbeat
    pub fn time_since_heartbeat(&self) -> Duration {
        self.last_heartbeat.lock().elapsed()
    }

    /// Add a room; returns false if already joined
    pub(crate) fn add_room(&self, room: RoomKey) -> bool {
        self.rooms.write().insert(room)
    }

    /// Remove a room; returns false if not joined
    pub(crate) fn remove_room(&self, room: &RoomKey) -> bool {
        self.rooms.write().remove(room)
    }

    /// Rooms currently joined
    pub fn rooms(&self) -> Vec<RoomKey> {
        self.rooms.read().iter().copied().collect()
    }

    /// Check if the connection is in a room
    pub fn is_in_room(&self, room: &RoomKey) -> bool {
        self.rooms.read().contains(room)
    }

    /// Get connection age
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Send a message, waiting for channel capacity
    pub async fn send(&self, message: GatewayMessage) -> Result<(), mpsc::error::SendError<GatewayMessage>> {
        self.sender.send(message).await
    }

    /// Try to send a message (non-blocking)
    pub fn try_send(&self, message: GatewayMessage) -> Result<(), mpsc::error::TrySendError<GatewayMessage>> {
        self.sender.try_send(message)
    }

    /// Check if the send task has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("rooms", &self.rooms.read().len())
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::{RoomKind, Snowflake};

    #[tokio::test]
    async fn test_connection_creation() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("conn1".to_string(), tx);

        assert_eq!(conn.id(), "conn1");
        assert!(conn.rooms().is_empty());
        assert!(!conn.is_closed());
    }

    #[tokio::test]
    async fn test_connection_rooms() {
        let (tx, _rx) = mpsc::channel(10);
        let conn = Connection::new("conn1".to_string(), tx);
        let room = RoomKey::new(RoomKind::Post, Snowflake::new(42));

        assert!(conn.add_room(room));
        assert!(!conn.add_room(room));
        assert!(conn.is_in_room(&room));

        assert!(conn.remove_room(&room));
        assert!(!conn.remove_room(&room));
        assert!(!conn.is_in_room(&room));
    }

    #[tokio::test]
    async fn test_try_send_on_full_channel() {
        let (tx, _rx) = mpsc::channel(1);
        let conn = Connection::new("conn1".to_string(), tx);

        assert!(conn.try_send(GatewayMessage::heartbeat_ack()).is_ok());
        assert!(matches!(
            conn.try_send(GatewayMessage::heartbeat_ack()),
            Err(mpsc::error::TrySendError::Full(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_after_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        let conn = Connection::new("conn1".to_string(), tx);
        drop(rx);
        assert!(conn.is_closed());
    }
}
