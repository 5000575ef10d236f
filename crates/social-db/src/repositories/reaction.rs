//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Reaction;
use social_core::traits::{ReactionRepository, RepoResult};
use social_core::value_objects::{PostKind, Snowflake};

use crate::models::ReactionModel;
use crate::tables::TableSet;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<Reaction> {
        let tables = TableSet::for_kind(reaction.kind);
        let fk = tables.post_fk;

        let result = match reaction.kind.group_id() {
            Some(group_id) => {
                let sql = format!(
                    r"
                    INSERT INTO {table} ({fk}, user_id, group_id, emoji, updated_at)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT ({fk}, user_id)
                    DO UPDATE SET emoji = EXCLUDED.emoji, updated_at = EXCLUDED.updated_at
                    RETURNING {fk} AS post_id, user_id, emoji, updated_at
                    ",
                    table = tables.reactions,
                );
                sqlx::query_as::<_, ReactionModel>(&sql)
                    .bind(reaction.post_id.into_inner())
                    .bind(reaction.user_id.into_inner())
                    .bind(group_id.into_inner())
                    .bind(&reaction.emoji)
                    .bind(reaction.updated_at)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    r"
                    INSERT INTO {table} ({fk}, user_id, emoji, updated_at)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT ({fk}, user_id)
                    DO UPDATE SET emoji = EXCLUDED.emoji, updated_at = EXCLUDED.updated_at
                    RETURNING {fk} AS post_id, user_id, emoji, updated_at
                    ",
                    table = tables.reactions,
                );
                sqlx::query_as::<_, ReactionModel>(&sql)
                    .bind(reaction.post_id.into_inner())
                    .bind(reaction.user_id.into_inner())
                    .bind(&reaction.emoji)
                    .bind(reaction.updated_at)
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        Ok(result.into_reaction(reaction.kind))
    }

    #[instrument(skip(self))]
    async fn remove(
        &self,
        kind: PostKind,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1 AND user_id = $2",
            tables.reactions, tables.post_fk
        );

        let result = sqlx::query(&sql)
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        kind: PostKind,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            r"
            SELECT {fk} AS post_id, user_id, emoji, updated_at
            FROM {table}
            WHERE {fk} = $1 AND user_id = $2
            ",
            fk = tables.post_fk,
            table = tables.reactions,
        );

        let result = sqlx::query_as::<_, ReactionModel>(&sql)
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(|model| model.into_reaction(kind)))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, kind: PostKind, post_id: Snowflake) -> RepoResult<Vec<Reaction>> {
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            r"
            SELECT {fk} AS post_id, user_id, emoji, updated_at
            FROM {table}
            WHERE {fk} = $1{filter}
            ORDER BY updated_at
            ",
            fk = tables.post_fk,
            table = tables.reactions,
            filter = tables.group_filter(2),
        );

        let mut query = sqlx::query_as::<_, ReactionModel>(&sql).bind(post_id.into_inner());
        if let Some(group_id) = kind.group_id() {
            query = query.bind(group_id.into_inner());
        }

        let results = query.fetch_all(&self.pool).await.map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|model| model.into_reaction(kind))
            .collect())
    }
}
