//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentInput, CreateGroupRequest, CreatePostInput, GroupScope, LoginRequest,
    PaginationQuery, RegisterRequest, SetReactionRequest, UpdateCommentRequest,
    UpdateProfileRequest,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, CommentCreated, CommentResponse, CurrentUserResponse, FailedMedia,
    GroupResponse, HealthChecks, HealthResponse, MediaResponse, MembershipResponse,
    PaginatedResponse, PaginationMeta, PartialCommentResponse, PostResponse, ReactionResponse,
    ReadinessResponse, SessionResponse, UploadResponse, UserResponse,
};

// Re-export mapper helper structs
pub use mappers::{CommentWithDetails, GroupWithCount, PostWithDetails};
