//! # social-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a shared [`ServiceContext`] and are created per request:
//!
//! ```ignore
//! let created = CommentService::new(&ctx)
//!     .create_comment(user_id, input)
//!     .await?;
//! ```

pub mod broadcast;
pub mod dto;
pub mod media;
pub mod services;

pub use dto::{
    AuthResponse, CommentCreated, CommentResponse, CreateCommentInput, CreateGroupRequest,
    CreatePostInput, CurrentUserResponse, FailedMedia, GroupResponse, GroupScope, HealthResponse,
    LoginRequest, MembershipResponse, PaginatedResponse, PaginationQuery, PartialCommentResponse,
    PostResponse, ReactionResponse, ReadinessResponse, RegisterRequest, SessionResponse,
    SetReactionRequest, UpdateCommentRequest, UpdateProfileRequest, UploadResponse, UserResponse,
};
pub use broadcast::RoomPublisher;
pub use media::{LocalMediaSink, MediaSink, UploadedFile};
pub use services::{
    AuthService, CommentService, GroupService, LoginOutcome, PostService, ReactionService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UploadService,
    UserService,
};
