//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_core::entities::{Comment, Group, LikeSummary, Media, Post, Reaction, User};
use social_core::Snowflake;

use super::responses::{
    CommentResponse, CurrentUserResponse, GroupResponse, MediaResponse, PostResponse,
    ReactionResponse, UploadResponse, UserResponse,
};

fn id_string(id: Option<Snowflake>) -> Option<String> {
    id.map(|id| id.to_string())
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            profile_picture: user.profile_picture.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            profile_picture: user.profile_picture.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Media Mappers
// ============================================================================

impl From<&Media> for MediaResponse {
    fn from(media: &Media) -> Self {
        Self {
            id: media.id.to_string(),
            url: media.url.clone(),
            media_type: media.media_type.as_str().to_string(),
        }
    }
}

impl From<&Media> for UploadResponse {
    fn from(media: &Media) -> Self {
        Self {
            url: media.url.clone(),
            media_type: media.media_type.as_str().to_string(),
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// Post with its media and author
#[derive(Debug, Clone)]
pub struct PostWithDetails {
    pub post: Post,
    pub media: Vec<Media>,
    pub author: Option<User>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            group_id: id_string(post.kind.group_id()),
            author_id: post.author_id.to_string(),
            author: None,
            content: post.content.clone(),
            media: Vec::new(),
            created_at: post.created_at,
        }
    }
}

impl From<PostWithDetails> for PostResponse {
    fn from(details: PostWithDetails) -> Self {
        let mut response = Self::from(&details.post);
        response.media = details.media.iter().map(MediaResponse::from).collect();
        response.author = details.author.as_ref().map(UserResponse::from);
        response
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

/// Comment with media, author and like data
#[derive(Debug, Clone)]
pub struct CommentWithDetails {
    pub comment: Comment,
    pub media: Vec<Media>,
    pub author: Option<User>,
    pub likes: Option<LikeSummary>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            group_id: id_string(comment.kind.group_id()),
            author_id: comment.author_id.to_string(),
            author: None,
            content: comment.content.clone(),
            parent_comment_id: id_string(comment.parent_comment_id),
            media: Vec::new(),
            like_count: 0,
            liked_by_me: false,
            created_at: comment.created_at,
            edited_at: comment.edited_at,
            replies: Vec::new(),
        }
    }
}

impl From<CommentWithDetails> for CommentResponse {
    fn from(details: CommentWithDetails) -> Self {
        let mut response = Self::from(&details.comment);
        response.media = details.media.iter().map(MediaResponse::from).collect();
        response.author = details.author.as_ref().map(UserResponse::from);
        if let Some(likes) = details.likes {
            response.like_count = likes.count;
            response.liked_by_me = likes.me;
        }
        response
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            post_id: reaction.post_id.to_string(),
            group_id: id_string(reaction.kind.group_id()),
            user_id: reaction.user_id.to_string(),
            emoji: reaction.emoji.clone(),
            updated_at: reaction.updated_at,
        }
    }
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self::from(&reaction)
    }
}

// ============================================================================
// Group Mappers
// ============================================================================

/// Group with its member count
#[derive(Debug, Clone)]
pub struct GroupWithCount {
    pub group: Group,
    pub member_count: i64,
}

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name.clone(),
            description: group.description.clone(),
            creator_id: group.creator_id.to_string(),
            member_count: None,
            created_at: group.created_at,
        }
    }
}

impl From<GroupWithCount> for GroupResponse {
    fn from(value: GroupWithCount) -> Self {
        let mut response = Self::from(&value.group);
        response.member_count = Some(value.member_count);
        response
    }
}
