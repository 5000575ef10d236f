//! Session storage module.
//!
//! Server-side login sessions referenced by the session cookie.

mod store;

pub use store::{SessionData, SessionStore};
