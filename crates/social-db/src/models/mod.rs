//! Database models - SQLx-compatible structs for PostgreSQL rows
//!
//! Post-scoped models alias the kind-specific foreign key to a common name
//! (`post_id`, `owner_id`) in the SELECT list, so one model reads both the
//! global and the group tables.

mod comment;
mod group;
mod media;
mod post;
mod reaction;
mod user;

pub use comment::CommentModel;
pub use group::{GroupListModel, GroupModel};
pub use media::MediaModel;
pub use post::PostModel;
pub use reaction::{LikeSummaryModel, ReactionModel};
pub use user::UserModel;
