//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod comments;
pub mod groups;
pub mod health;
pub mod posts;
pub mod reactions;
pub mod uploads;
pub mod users;
