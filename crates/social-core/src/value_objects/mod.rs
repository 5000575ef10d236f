//! Value objects - immutable types that represent domain concepts

mod content;
mod media_policy;
mod post_kind;
mod room;
mod snowflake;

pub use content::{sanitize_content, MAX_CONTENT_LENGTH};
pub use media_policy::{MediaKind, MediaOwner, MediaPolicy, ALLOWED_MEDIA_TYPES};
pub use post_kind::PostKind;
pub use room::{RoomKey, RoomKind};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
