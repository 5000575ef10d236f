//! Business logic services
//!
//! One service per aggregate. Each borrows the [`ServiceContext`] and owns
//! validation, sanitization, authorization and event publication for its
//! operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod group;
pub mod post;
pub mod reaction;
pub mod upload;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthService, LoginOutcome};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use group::GroupService;
pub use post::PostService;
pub use reaction::ReactionService;
pub use upload::UploadService;
pub use user::UserService;
