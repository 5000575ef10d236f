//! Connection manager
//!
//! Holds every live connection and the room → connection index used for fan-out.

use super::Connection;
use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use social_core::RoomKey;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by connection ID
    connections: DashMap<String, Arc<Connection>>,

    /// Room to connection IDs mapping
    rooms: DashMap<RoomKey, HashSet<String>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(&self, id: String, sender: mpsc::Sender<GatewayMessage>) -> Arc<Connection> {
        let connection = Connection::new(id.clone(), sender);
        self.connections.insert(id.clone(), connection.clone());

        tracing::debug!(connection_id = %id, "Connection added");

        connection
    }

    /// Remove a connection and drop it from every room it joined
    pub fn remove_connection(&self, id: &str) {
        if let Some((_, connection)) = self.connections.remove(id) {
            for room in connection.rooms() {
                self.detach(&room, id);
            }

            tracing::debug!(connection_id = %id, "Connection removed");
        }
    }

    /// Get a connection by ID
    pub fn get_connection(&self, id: &str) -> Option<Arc<Connection>> {
        self.connections.get(id).map(|r| r.clone())
    }

    /// Add a connection to a room
    ///
    /// Returns false when the connection is unknown.
    pub fn join_room(&self, id: &str, room: RoomKey) -> bool {
        let Some(connection) = self.get_connection(id) else {
            return false;
        };

        connection.add_room(room);
        self.rooms.entry(room).or_default().insert(id.to_string());

        tracing::debug!(connection_id = %id, room = %room, "Joined room");
        true
    }

    /// Remove a connection from a room
    ///
    /// Returns false when the connection is unknown.
    pub fn leave_room(&self, id: &str, room: &RoomKey) -> bool {
        let Some(connection) = self.get_connection(id) else {
            return false;
        };

        if connection.remove_room(room) {
            self.detach(room, id);
            tracing::debug!(connection_id = %id, room = %room, "Left room");
        }
        true
    }

    fn detach(&self, room: &RoomKey, id: &str) {
        self.rooms.alter(room, |_, mut members| {
            members.remove(id);
            members
        });
        self.rooms.remove_if(room, |_, members| members.is_empty());
    }

    /// Get all connections in a room
    pub fn get_room_connections(&self, room: &RoomKey) -> Vec<Arc<Connection>> {
        self.rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Send a message to every connection in a room
    ///
    /// Never waits on a slow client: a full outbound queue drops the frame for
    /// that connection only. Returns the number of connections that accepted it.
    pub fn send_to_room(&self, room: &RoomKey, message: &GatewayMessage) -> usize {
        let mut sent = 0;

        for conn in self.get_room_connections(room) {
            match conn.try_send(message.clone()) {
                Ok(()) => sent += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(
                        connection_id = %conn.id(),
                        room = %room,
                        "Outbound queue full, dropping event"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::trace!(connection_id = %conn.id(), "Connection closed before delivery");
                }
            }
        }

        tracing::trace!(room = %room, sent = sent, "Message sent to room");

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of rooms with at least one connection
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of connections in a room
    pub fn room_size(&self, room: &RoomKey) -> usize {
        self.rooms.get(room).map_or(0, |members| members.len())
    }

    /// Check if a connection exists
    pub fn has_connection(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
