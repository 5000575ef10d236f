//! Reaction service
//!
//! Each user holds at most one emoji reaction per post. Setting a reaction
//! replaces the previous one; setting `null` removes it.

use social_core::entities::Reaction;
use social_core::{DomainError, PostKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{ReactionResponse, SetReactionRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Longest accepted emoji, in characters
pub const MAX_EMOJI_LENGTH: usize = 32;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set or clear the caller's reaction
    ///
    /// Returns `None` when the reaction was cleared.
    #[instrument(skip(self, request))]
    pub async fn set_reaction(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        request: SetReactionRequest,
    ) -> ServiceResult<Option<ReactionResponse>> {
        let kind = PostKind::from_group(request.group_id);

        if self.ctx.post_repo().find_by_id(kind, post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let Some(emoji) = request.emoji else {
            if self.ctx.reaction_repo().remove(kind, post_id, user_id).await? {
                info!(post_id = %post_id, user_id = %user_id, "Reaction removed");
            }
            return Ok(None);
        };

        let emoji = emoji.trim().to_string();
        let len = emoji.chars().count();
        if len == 0 || len > MAX_EMOJI_LENGTH {
            return Err(ServiceError::validation(format!(
                "Emoji must be 1-{MAX_EMOJI_LENGTH} characters"
            )));
        }

        let reaction = Reaction::new(kind, post_id, user_id, emoji);
        let stored = self.ctx.reaction_repo().upsert(&reaction).await?;

        info!(post_id = %post_id, user_id = %user_id, "Reaction set");

        Ok(Some(ReactionResponse::from(stored)))
    }

    /// List all reactions on a post
    #[instrument(skip(self))]
    pub async fn list_reactions(
        &self,
        kind: PostKind,
        post_id: Snowflake,
    ) -> ServiceResult<Vec<ReactionResponse>> {
        if self.ctx.post_repo().find_by_id(kind, post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let reactions = self.ctx.reaction_repo().find_by_post(kind, post_id).await?;
        Ok(reactions.iter().map(ReactionResponse::from).collect())
    }
}
