//! PostgreSQL implementation of LikeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::LikeSummary;
use social_core::traits::{LikeRepository, RepoResult};
use social_core::value_objects::{PostKind, Snowflake};

use crate::models::LikeSummaryModel;
use crate::tables::TableSet;

use super::error::{map_db_error, raw_ids};

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn like(
        &self,
        kind: PostKind,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<()> {
        let sql = format!(
            r"
            INSERT INTO {} (comment_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (comment_id, user_id) DO NOTHING
            ",
            TableSet::for_kind(kind).likes
        );

        sqlx::query(&sql)
            .bind(comment_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unlike(
        &self,
        kind: PostKind,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<()> {
        let sql = format!(
            "DELETE FROM {} WHERE comment_id = $1 AND user_id = $2",
            TableSet::for_kind(kind).likes
        );

        sqlx::query(&sql)
            .bind(comment_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, comment_ids), fields(comments = comment_ids.len()))]
    async fn summaries(
        &self,
        kind: PostKind,
        comment_ids: &[Snowflake],
        viewer_id: Snowflake,
    ) -> RepoResult<Vec<LikeSummary>> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r"
            SELECT comment_id, COUNT(*) AS count, BOOL_OR(user_id = $2) AS me
            FROM {}
            WHERE comment_id = ANY($1)
            GROUP BY comment_id
            ",
            TableSet::for_kind(kind).likes
        );

        let results = sqlx::query_as::<_, LikeSummaryModel>(&sql)
            .bind(raw_ids(comment_ids))
            .bind(viewer_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(LikeSummary::from).collect())
    }
}
