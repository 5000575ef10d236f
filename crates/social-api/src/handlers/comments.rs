//! Comment handlers
//!
//! Comments and replies share these endpoints. `group_id` (form field,
//! query or body) selects the group tables.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use social_core::{PostKind, Snowflake};
use social_service::{
    CommentCreated, CommentResponse, CommentService, CreateCommentInput,
    PartialCommentResponse, UpdateCommentRequest,
};

use crate::extractors::{AuthUser, MediaForm, Scope, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, MultiStatus, NoContent};
use crate::state::AppState;

/// Comments and replies on a post, replies nested under their parent
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
    Scope(scope): Scope,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comments = service
        .list_comments(PostKind::from_group(scope.group_id), post_id, auth.user_id)
        .await?;
    Ok(Json(comments))
}

/// Create a comment, or a reply when `parent_comment_id` is set
///
/// POST /posts/{post_id}/comments
///
/// Responds 201, or 207 when the comment was stored but some media failed.
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
    mut form: MediaForm,
) -> ApiResult<Response> {
    let mut input = CreateCommentInput::new(post_id);
    input.group_id = form.snowflake("group_id")?;
    input.parent_comment_id = form.snowflake("parent_comment_id")?;
    input.content = form.take_text("content");
    input.media = std::mem::take(&mut form.files);

    let service = CommentService::new(state.service_context());
    let created = service.create_comment(auth.user_id, input).await?;

    Ok(match created {
        CommentCreated::Complete(comment) => Created(Json(comment)).into_response(),
        CommentCreated::Partial {
            comment,
            failed_media,
        } => MultiStatus(Json(PartialCommentResponse {
            comment,
            failed_media,
        }))
        .into_response(),
    })
}

/// Edit a comment; author only
///
/// PATCH /comments/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(comment_id): SnowflakePath<Snowflake>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .edit_comment(comment_id, auth.user_id, request)
        .await?;
    Ok(Json(comment))
}

/// Delete a comment with its replies and media; author only
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(comment_id): SnowflakePath<Snowflake>,
    Scope(scope): Scope,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .delete_comment(PostKind::from_group(scope.group_id), comment_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Like a comment
///
/// PUT /comments/{comment_id}/like
pub async fn like_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(comment_id): SnowflakePath<Snowflake>,
    Scope(scope): Scope,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .like(PostKind::from_group(scope.group_id), comment_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Remove a like
///
/// DELETE /comments/{comment_id}/like
pub async fn unlike_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(comment_id): SnowflakePath<Snowflake>,
    Scope(scope): Scope,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .unlike(PostKind::from_group(scope.group_id), comment_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
