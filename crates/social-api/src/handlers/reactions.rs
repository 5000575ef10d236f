//! Reaction handlers
//!
//! One emoji reaction per user per post; setting replaces, `null` clears.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use social_core::{PostKind, Snowflake};
use social_service::{ReactionResponse, ReactionService, SetReactionRequest};

use crate::extractors::{AuthUser, JsonBody, Scope, SnowflakePath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Set or clear the caller's reaction
///
/// PUT /posts/{post_id}/reactions
///
/// Responds 200 with the reaction, or 204 when it was cleared.
pub async fn set_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
    JsonBody(request): JsonBody<SetReactionRequest>,
) -> ApiResult<Response> {
    let service = ReactionService::new(state.service_context());
    let reaction = service.set_reaction(post_id, auth.user_id, request).await?;

    Ok(match reaction {
        Some(reaction) => Json(reaction).into_response(),
        None => NoContent.into_response(),
    })
}

/// List reactions on a post
///
/// GET /posts/{post_id}/reactions
pub async fn list_reactions(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(post_id): SnowflakePath<Snowflake>,
    Scope(scope): Scope,
) -> ApiResult<Json<Vec<ReactionResponse>>> {
    let service = ReactionService::new(state.service_context());
    let reactions = service
        .list_reactions(PostKind::from_group(scope.group_id), post_id)
        .await?;
    Ok(Json(reactions))
}
