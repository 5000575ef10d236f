//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Parent comment not found: {0}")]
    ParentCommentNotFound(Snowflake),

    #[error("Group not found: {0}")]
    GroupNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Content or media is required")]
    EmptyContent,

    #[error("Replies cannot be nested more than one level")]
    NestedReply,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Media file too large: max {max_bytes} bytes")]
    MediaTooLarge { max_bytes: u64 },

    #[error("Too many files: max {max}")]
    TooManyFiles { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not post author")]
    NotPostAuthor,

    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Not a member of this group")]
    NotGroupMember,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Group name already in use")]
    GroupNameExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Group creator cannot leave the group")]
    CannotLeaveOwnedGroup,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ParentCommentNotFound(_) => "UNKNOWN_PARENT_COMMENT",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::NestedReply => "NESTED_REPLY",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::MediaTooLarge { .. } => "MEDIA_TOO_LARGE",
            Self::TooManyFiles { .. } => "TOO_MANY_FILES",

            // Authorization
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::NotGroupMember => "NOT_GROUP_MEMBER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::GroupNameExists => "GROUP_NAME_EXISTS",

            // Business Rules
            Self::CannotLeaveOwnedGroup => "CANNOT_LEAVE_OWNED_GROUP",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::ParentCommentNotFound(_)
                | Self::GroupNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
                | Self::EmptyContent
                | Self::NestedReply
                | Self::UnsupportedMediaType(_)
                | Self::MediaTooLarge { .. }
                | Self::TooManyFiles { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotPostAuthor | Self::NotCommentAuthor | Self::NotGroupMember
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::UsernameAlreadyExists | Self::GroupNameExists
        )
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::CannotLeaveOwnedGroup)
    }
}
