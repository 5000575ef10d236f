//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Group;
use social_core::error::DomainError;
use social_core::traits::{GroupRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::{GroupListModel, GroupModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of GroupRepository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT id, name, description, creator_id, created_at
            FROM groups
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<(Group, i64)>> {
        let results = sqlx::query_as::<_, GroupListModel>(
            r"
            SELECT g.id, g.name, g.description, g.creator_id, g.created_at,
                   COUNT(m.user_id) AS member_count
            FROM groups g
            LEFT JOIN group_members m ON m.group_id = g.id
            GROUP BY g.id
            ORDER BY g.name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn create(&self, group: &Group) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO groups (id, name, description, creator_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.creator_id.into_inner())
        .bind(group.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::GroupNameExists))?;

        sqlx::query("INSERT INTO group_members (group_id, user_id) VALUES ($1, $2)")
            .bind(group.id.into_inner())
            .bind(group.creator_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, group_id: Snowflake) -> RepoResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_members WHERE group_id = $1")
            .bind(group_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count.0)
    }

    #[instrument(skip(self))]
    async fn add_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO group_members (group_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (group_id, user_id) DO NOTHING
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND user_id = $2")
            .bind(group_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, group_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM group_members WHERE group_id = $1 AND user_id = $2)",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists.0)
    }
}
