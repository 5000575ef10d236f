//! Connection management
//!
//! Tracks live WebSocket connections and the post rooms they joined.

mod connection;
mod manager;

pub use connection::Connection;
pub use manager::ConnectionManager;
