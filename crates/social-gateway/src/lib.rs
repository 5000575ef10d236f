//! # social-gateway
//!
//! WebSocket gateway for post rooms. Clients join `post:{id}` or
//! `group-post:{id}` rooms and receive the comment and deletion events the
//! API publishes to Redis for that room.

pub mod auth;
pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use auth::{SessionLookup, SocketAuthenticator, SocketCredentials};
pub use server::{create_app, create_gateway_state, create_gateway_state_with, run, GatewayState};
