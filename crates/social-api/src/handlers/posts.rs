//! Post handlers
//!
//! Global posts live under `/posts`, group posts under
//! `/groups/{group_id}/posts`. Both take multipart bodies with a `content`
//! field and up to the configured number of `media` files.

use axum::{extract::State, Json};
use social_core::{PostKind, Snowflake};
use social_service::{CreatePostInput, PaginatedResponse, PostResponse, PostService};

use crate::extractors::{AuthUser, GroupPostPath, MediaForm, Pagination, SnowflakePath};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

fn post_input(mut form: MediaForm) -> CreatePostInput {
    CreatePostInput {
        content: form.take_text("content"),
        media: form.files,
    }
}

/// Global feed, newest first
///
/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Pagination(query): Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let page = service.list_posts(PostKind::Global, query).await?;
    Ok(Json(page))
}

/// Create a global post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    form: MediaForm,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service
        .create_post(PostKind::Global, auth.user_id, post_input(form))
        .await?;
    Ok(Created(Json(post)))
}

/// Get a global post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_post(PostKind::Global, post_id).await?;
    Ok(Json(post))
}

/// Delete a global post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service
        .delete_post(PostKind::Global, post_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Group feed, newest first
///
/// GET /groups/{group_id}/posts
pub async fn list_group_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(group_id): SnowflakePath<Snowflake>,
    Pagination(query): Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let page = service.list_posts(PostKind::Group(group_id), query).await?;
    Ok(Json(page))
}

/// Create a post in a group; members only
///
/// POST /groups/{group_id}/posts
pub async fn create_group_post(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(group_id): SnowflakePath<Snowflake>,
    form: MediaForm,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service
        .create_post(PostKind::Group(group_id), auth.user_id, post_input(form))
        .await?;
    Ok(Created(Json(post)))
}

/// Get a group post
///
/// GET /groups/{group_id}/posts/{post_id}
pub async fn get_group_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(path): SnowflakePath<GroupPostPath>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service
        .get_post(PostKind::Group(path.group_id), path.post_id)
        .await?;
    Ok(Json(post))
}

/// Delete a group post
///
/// DELETE /groups/{group_id}/posts/{post_id}
pub async fn delete_group_post(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<GroupPostPath>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service
        .delete_post(PostKind::Group(path.group_id), path.post_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
