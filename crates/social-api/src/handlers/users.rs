//! User handlers
//!
//! Endpoints for profiles and profile pictures.

use axum::{extract::State, Json};
use social_core::Snowflake;
use social_service::{CurrentUserResponse, UpdateProfileRequest, UserResponse, UserService};

use crate::extractors::{AuthUser, MediaForm, SnowflakePath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update current user
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Replace the current user's profile picture
///
/// PUT /users/@me/avatar
pub async fn set_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    form: MediaForm,
) -> ApiResult<Json<CurrentUserResponse>> {
    let file = form.single_file()?;
    let service = UserService::new(state.service_context());
    let response = service.set_avatar(auth.user_id, file).await?;
    Ok(Json(response))
}

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(user_id): SnowflakePath<Snowflake>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}
