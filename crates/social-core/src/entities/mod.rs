//! Domain entities - core business objects

mod comment;
mod group;
mod media;
mod post;
mod reaction;
mod user;

pub use comment::Comment;
pub use group::{Group, GroupMember};
pub use media::Media;
pub use post::Post;
pub use reaction::{LikeSummary, Reaction};
pub use user::User;
