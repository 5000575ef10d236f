//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Media, Post};
use social_core::traits::{PostQuery, PostRepository, RepoResult};
use social_core::value_objects::{MediaOwner, PostKind, Snowflake};

use crate::models::PostModel;
use crate::tables::TableSet;

use super::error::{map_db_error, post_not_found};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, kind: PostKind, id: Snowflake) -> RepoResult<Option<Post>> {
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            "SELECT id, author_id, content, created_at, {} FROM {} WHERE id = $1{}",
            tables.group_select(),
            tables.posts,
            tables.group_filter(2),
        );

        let mut query = sqlx::query_as::<_, PostModel>(&sql).bind(id.into_inner());
        if let Some(group_id) = kind.group_id() {
            query = query.bind(group_id.into_inner());
        }

        let result = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, kind: PostKind, query: PostQuery) -> RepoResult<Vec<Post>> {
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            r"
            SELECT id, author_id, content, created_at, {}
            FROM {}
            WHERE ($1::BIGINT IS NULL OR id < $1){}
            ORDER BY id DESC
            LIMIT $2
            ",
            tables.group_select(),
            tables.posts,
            tables.group_filter(3),
        );

        let mut q = sqlx::query_as::<_, PostModel>(&sql)
            .bind(query.before.map(|id| id.into_inner()))
            .bind(query.limit);
        if let Some(group_id) = kind.group_id() {
            q = q.bind(group_id.into_inner());
        }

        let results = q.fetch_all(&self.pool).await.map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post, media), fields(post_id = %post.id, media = media.len()))]
    async fn create_with_media(&self, post: &Post, media: &[Media]) -> RepoResult<()> {
        let tables = TableSet::for_kind(post.kind);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        match post.kind.group_id() {
            Some(group_id) => {
                let sql = format!(
                    "INSERT INTO {} (id, group_id, author_id, content, created_at) VALUES ($1, $2, $3, $4, $5)",
                    tables.posts
                );
                sqlx::query(&sql)
                    .bind(post.id.into_inner())
                    .bind(group_id.into_inner())
                    .bind(post.author_id.into_inner())
                    .bind(&post.content)
                    .bind(post.created_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }
            None => {
                let sql = format!(
                    "INSERT INTO {} (id, author_id, content, created_at) VALUES ($1, $2, $3, $4)",
                    tables.posts
                );
                sqlx::query(&sql)
                    .bind(post.id.into_inner())
                    .bind(post.author_id.into_inner())
                    .bind(&post.content)
                    .bind(post.created_at)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
            }
        }

        let (media_table, owner_column) = tables.media(MediaOwner::Post);
        let media_sql = format!(
            "INSERT INTO {media_table} (id, {owner_column}, url, media_type, created_at) VALUES ($1, $2, $3, $4, $5)"
        );
        for item in media {
            sqlx::query(&media_sql)
                .bind(item.id.into_inner())
                .bind(post.id.into_inner())
                .bind(&item.url)
                .bind(item.media_type.as_str())
                .bind(item.created_at)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: PostKind, id: Snowflake) -> RepoResult<()> {
        // Media, comments, likes and reactions go with the post via ON DELETE CASCADE
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            "DELETE FROM {} WHERE id = $1{}",
            tables.posts,
            tables.group_filter(2)
        );

        let mut query = sqlx::query(&sql).bind(id.into_inner());
        if let Some(group_id) = kind.group_id() {
            query = query.bind(group_id.into_inner());
        }

        let result = query.execute(&self.pool).await.map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }
}
