//! Request DTOs for API endpoints
//!
//! JSON request DTOs implement `Deserialize` and `Validate` for input
//! validation. Multipart bodies are parsed by the API layer into the
//! `*Input` structs below.

use serde::Deserialize;
use social_core::Snowflake;
use validator::Validate;

use crate::media::UploadedFile;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request
///
/// `display_name: null` clears the display name.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: Option<String>,
}

// ============================================================================
// Post & Comment Requests
// ============================================================================

/// Cursor pagination for post feeds
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PaginationQuery {
    /// Return posts with an id lower than this one
    pub before: Option<Snowflake>,

    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub const DEFAULT_LIMIT: i64 = 20;

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// Optional group scope carried in a query string or JSON body
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GroupScope {
    pub group_id: Option<Snowflake>,
}

/// New post, parsed from a multipart body
#[derive(Debug, Default)]
pub struct CreatePostInput {
    pub content: Option<String>,
    pub media: Vec<UploadedFile>,
}

/// New comment or reply, parsed from a multipart body
#[derive(Debug)]
pub struct CreateCommentInput {
    pub post_id: Snowflake,
    pub group_id: Option<Snowflake>,
    pub parent_comment_id: Option<Snowflake>,
    pub content: Option<String>,
    pub media: Vec<UploadedFile>,
}

impl CreateCommentInput {
    pub fn new(post_id: Snowflake) -> Self {
        Self {
            post_id,
            group_id: None,
            parent_comment_id: None,
            content: None,
            media: Vec::new(),
        }
    }
}

/// Edit comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub group_id: Option<Snowflake>,
}

/// Set or clear the caller's reaction on a post
#[derive(Debug, Clone, Deserialize)]
pub struct SetReactionRequest {
    /// `null` removes the reaction
    pub emoji: Option<String>,

    pub group_id: Option<Snowflake>,
}

// ============================================================================
// Group Requests
// ============================================================================

/// Create group request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Group name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}
