//! Event broadcasting
//!
//! Forwards room events from Redis Pub/Sub to the WebSocket connections in that room.

mod dispatcher;

pub use dispatcher::{route_to_room, EventDispatcher, EventDispatcherConfig};
