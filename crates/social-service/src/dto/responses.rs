//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, next_before: Option<String>, has_more: bool, limit: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                next_before,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next (older) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_before: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i64,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Login response; the session id travels in a cookie, not in the body
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: CurrentUserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: i64, user: CurrentUserResponse) -> Self {
        Self {
            user,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// Session check response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (limited fields)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current user response (includes private fields)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Media Responses
// ============================================================================

/// Media item attached to a post or comment
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Result of a standalone upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post response with media and author
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub content: String,
    pub media: Vec<MediaResponse>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment or reply response
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub content: String,
    pub parent_comment_id: Option<String>,
    pub media: Vec<MediaResponse>,
    pub like_count: i64,
    pub liked_by_me: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    /// Replies of a top-level comment, oldest first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentResponse>,
}

/// A media file that could not be stored with its comment
#[derive(Debug, Clone, Serialize)]
pub struct FailedMedia {
    pub file_name: String,
    pub reason: String,
}

/// Outcome of creating a comment
#[derive(Debug, Clone)]
pub enum CommentCreated {
    /// Comment and every media item stored; the room was notified
    Complete(CommentResponse),
    /// Comment stored but some media failed; nothing was broadcast
    Partial {
        comment: CommentResponse,
        failed_media: Vec<FailedMedia>,
    },
}

impl CommentCreated {
    pub fn comment(&self) -> &CommentResponse {
        match self {
            Self::Complete(comment) | Self::Partial { comment, .. } => comment,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }
}

/// Body of a 207 response
#[derive(Debug, Serialize)]
pub struct PartialCommentResponse {
    pub comment: CommentResponse,
    pub failed_media: Vec<FailedMedia>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// A user's reaction on a post
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub post_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub user_id: String,
    pub emoji: String,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Group Responses
// ============================================================================

/// Group response
#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Membership status of a user in a group
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub group_id: String,
    pub user_id: String,
    pub is_member: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
