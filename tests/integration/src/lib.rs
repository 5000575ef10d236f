//! Integration test utilities for the social backend
//!
//! Spawns the REST API and the WebSocket gateway in-process and provides
//! clients for driving them end to end.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
