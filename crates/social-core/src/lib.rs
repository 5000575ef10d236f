//! # social-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, Group, GroupMember, LikeSummary, Media, Post, Reaction, User};
pub use error::DomainError;
pub use events::{DomainEvent, DomainEventKind};
pub use traits::{
    CommentRepository, GroupRepository, LikeRepository, MediaRepository, PostQuery,
    PostRepository, ReactionRepository, RepoResult, UserRepository,
};
pub use value_objects::{
    sanitize_content, MediaKind, MediaOwner, MediaPolicy, PostKind, RoomKey, RoomKind,
    Snowflake, SnowflakeGenerator, SnowflakeParseError, ALLOWED_MEDIA_TYPES,
    MAX_CONTENT_LENGTH,
};
