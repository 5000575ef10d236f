//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Post-scoped repositories resolve their tables through [`crate::TableSet`].

mod comment;
mod error;
mod group;
mod like;
mod media;
mod post;
mod reaction;
mod user;

pub use comment::PgCommentRepository;
pub use group::PgGroupRepository;
pub use like::PgLikeRepository;
pub use media::PgMediaRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
