//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, GroupRepository, LikeRepository, MediaRepository, PostQuery,
    PostRepository, ReactionRepository, RepoResult, UserRepository,
};
