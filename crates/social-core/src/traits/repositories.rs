//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Post-scoped repositories take a [`PostKind`]
//! and serve both the global and the group tables.

use async_trait::async_trait;

use crate::entities::{Comment, Group, LikeSummary, Media, Post, Reaction, User};
use crate::error::DomainError;
use crate::value_objects::{MediaOwner, PostKind, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find several users at once (missing ids are skipped)
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields (display name, profile picture)
    async fn update_profile(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Pagination options for feed queries
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub before: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post of the given kind
    async fn find_by_id(&self, kind: PostKind, id: Snowflake) -> RepoResult<Option<Post>>;

    /// List posts newest first
    async fn list(&self, kind: PostKind, query: PostQuery) -> RepoResult<Vec<Post>>;

    /// Insert a post together with its media in one transaction
    async fn create_with_media(&self, post: &Post, media: &[Media]) -> RepoResult<()>;

    /// Delete a post with its media, comments and reactions
    async fn delete(&self, kind: PostKind, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find a comment or reply
    async fn find_by_id(&self, kind: PostKind, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// All comments and replies under a post, oldest first
    async fn find_by_post(&self, kind: PostKind, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Insert a comment row
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Update comment content (edit)
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment, its replies and all of their media and likes
    async fn delete(&self, kind: PostKind, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Media Repository
// ============================================================================

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Insert one media row for a post or comment
    async fn create(&self, kind: PostKind, owner: MediaOwner, media: &Media) -> RepoResult<()>;

    /// Media of several owners, grouped by the caller
    async fn find_by_owners(
        &self,
        kind: PostKind,
        owner: MediaOwner,
        owner_ids: &[Snowflake],
    ) -> RepoResult<Vec<Media>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert or replace the caller's reaction (last write wins)
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<Reaction>;

    /// Remove the caller's reaction; returns whether a row existed
    async fn remove(&self, kind: PostKind, post_id: Snowflake, user_id: Snowflake)
        -> RepoResult<bool>;

    /// Find the reaction of one user
    async fn find(
        &self,
        kind: PostKind,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>>;

    /// All reactions on a post
    async fn find_by_post(&self, kind: PostKind, post_id: Snowflake) -> RepoResult<Vec<Reaction>>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Like a comment or reply (idempotent)
    async fn like(&self, kind: PostKind, comment_id: Snowflake, user_id: Snowflake)
        -> RepoResult<()>;

    /// Remove a like (idempotent)
    async fn unlike(
        &self,
        kind: PostKind,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<()>;

    /// Like counts for comments, plus whether `viewer_id` liked each
    async fn summaries(
        &self,
        kind: PostKind,
        comment_ids: &[Snowflake],
        viewer_id: Snowflake,
    ) -> RepoResult<Vec<LikeSummary>>;
}

// ============================================================================
// Group Repository
// ============================================================================

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>>;

    /// List all groups with member counts
    async fn list(&self) -> RepoResult<Vec<(Group, i64)>>;

    /// Create a group and make the creator its first member
    async fn create(&self, group: &Group) -> RepoResult<()>;

    /// Get member count for a group
    async fn member_count(&self, group_id: Snowflake) -> RepoResult<i64>;

    /// Add a member; returns false if already a member
    async fn add_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Remove a member
    async fn remove_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Check if user is a member of group
    async fn is_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;
}
