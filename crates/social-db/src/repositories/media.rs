//! PostgreSQL implementation of MediaRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Media;
use social_core::traits::{MediaRepository, RepoResult};
use social_core::value_objects::{MediaOwner, PostKind, Snowflake};

use crate::models::MediaModel;
use crate::tables::TableSet;

use super::error::{map_db_error, raw_ids};

/// PostgreSQL implementation of MediaRepository
#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    /// Create a new PgMediaRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    #[instrument(skip(self, media), fields(media_id = %media.id))]
    async fn create(&self, kind: PostKind, owner: MediaOwner, media: &Media) -> RepoResult<()> {
        let (table, owner_column) = TableSet::for_kind(kind).media(owner);
        let sql = format!(
            "INSERT INTO {table} (id, {owner_column}, url, media_type, created_at) VALUES ($1, $2, $3, $4, $5)"
        );

        sqlx::query(&sql)
            .bind(media.id.into_inner())
            .bind(media.owner_id.into_inner())
            .bind(&media.url)
            .bind(media.media_type.as_str())
            .bind(media.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, owner_ids), fields(owners = owner_ids.len()))]
    async fn find_by_owners(
        &self,
        kind: PostKind,
        owner: MediaOwner,
        owner_ids: &[Snowflake],
    ) -> RepoResult<Vec<Media>> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let (table, owner_column) = TableSet::for_kind(kind).media(owner);
        let sql = format!(
            r"
            SELECT id, {owner_column} AS owner_id, url, media_type, created_at
            FROM {table}
            WHERE {owner_column} = ANY($1)
            ORDER BY id ASC
            "
        );

        let results = sqlx::query_as::<_, MediaModel>(&sql)
            .bind(raw_ids(owner_ids))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Media::try_from).collect()
    }
}
