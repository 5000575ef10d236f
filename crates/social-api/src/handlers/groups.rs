//! Group handlers
//!
//! Endpoints for groups and membership. Group posts are in `posts`.

use axum::{extract::State, Json};
use social_core::Snowflake;
use social_service::{CreateGroupRequest, GroupResponse, GroupService, MembershipResponse};

use crate::extractors::{AuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List groups with member counts
///
/// GET /groups
pub async fn list_groups(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<GroupResponse>>> {
    let service = GroupService::new(state.service_context());
    let groups = service.list_groups().await?;
    Ok(Json(groups))
}

/// Create a group; the creator becomes its first member
///
/// POST /groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGroupRequest>,
) -> ApiResult<Created<Json<GroupResponse>>> {
    let service = GroupService::new(state.service_context());
    let group = service.create_group(auth.user_id, request).await?;
    Ok(Created(Json(group)))
}

/// Get a group
///
/// GET /groups/{group_id}
pub async fn get_group(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(group_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<GroupResponse>> {
    let service = GroupService::new(state.service_context());
    let group = service.get_group(group_id).await?;
    Ok(Json(group))
}

/// Join a group
///
/// POST /groups/{group_id}/join
pub async fn join_group(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(group_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = GroupService::new(state.service_context());
    service.join_group(group_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Whether the caller belongs to the group
///
/// GET /groups/{group_id}/membership
pub async fn get_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(group_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<MembershipResponse>> {
    let service = GroupService::new(state.service_context());
    let membership = service.membership(group_id, auth.user_id).await?;
    Ok(Json(membership))
}

/// Leave a group
///
/// DELETE /groups/{group_id}/membership
pub async fn leave_group(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(group_id): SnowflakePath<Snowflake>,
) -> ApiResult<NoContent> {
    let service = GroupService::new(state.service_context());
    service.leave_group(group_id, auth.user_id).await?;
    Ok(NoContent)
}
