//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for test data, stable across parallel test binaries
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!("{}{}", COUNTER.fetch_add(1, Ordering::SeqCst), nanos % 100_000)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("user{suffix}@example.com"),
            password: "TestPass123".to_string(),
            display_name: None,
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Current user as returned by `/auth/register` and `/users/@me`
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub profile_picture: Option<String>,
}

/// Login response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: CurrentUser,
    pub access_token: String,
    pub token_type: String,
}

/// Session status
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: CurrentUser,
}

/// Attached media
#[derive(Debug, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Post
#[derive(Debug, Deserialize)]
pub struct PostItem {
    pub id: String,
    pub group_id: Option<String>,
    pub author_id: String,
    pub content: String,
    pub media: Vec<MediaItem>,
}

/// One page of a feed
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub next_before: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

/// Comment or reply
#[derive(Debug, Deserialize)]
pub struct CommentItem {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub parent_comment_id: Option<String>,
    pub media: Vec<MediaItem>,
    pub like_count: i64,
    pub liked_by_me: bool,
    pub edited_at: Option<String>,
    #[serde(default)]
    pub replies: Vec<CommentItem>,
}

/// Reaction
#[derive(Debug, Deserialize)]
pub struct ReactionItem {
    pub post_id: String,
    pub user_id: String,
    pub emoji: String,
}

/// Create group request
#[derive(Debug, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateGroupRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Group {}", unique_suffix()),
            description: Some("A test group".to_string()),
        }
    }
}

/// Group
#[derive(Debug, Deserialize)]
pub struct GroupItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
}

/// Membership status
#[derive(Debug, Deserialize)]
pub struct MembershipItem {
    pub group_id: String,
    pub user_id: String,
    pub is_member: bool,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// Domain reason code, when the API attached one
    pub fn reason(&self) -> Option<&str> {
        self.details.as_ref()?.get("reason")?.as_str()
    }
}
