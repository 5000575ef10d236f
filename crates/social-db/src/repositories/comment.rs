//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Comment;
use social_core::traits::{CommentRepository, RepoResult};
use social_core::value_objects::{PostKind, Snowflake};

use crate::models::CommentModel;
use crate::tables::TableSet;

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_sql(tables: &TableSet) -> String {
        format!(
            r"
            SELECT c.id, c.{fk} AS post_id, c.author_id, c.content,
                   c.parent_comment_id, c.created_at, c.edited_at
            FROM {comments} c
            JOIN {posts} p ON p.id = c.{fk}
            ",
            fk = tables.post_fk,
            comments = tables.comments,
            posts = tables.posts,
        )
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, kind: PostKind, id: Snowflake) -> RepoResult<Option<Comment>> {
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            "{} WHERE c.id = $1{}",
            Self::select_sql(tables),
            tables.group_filter(2)
        );

        let mut query = sqlx::query_as::<_, CommentModel>(&sql).bind(id.into_inner());
        if let Some(group_id) = kind.group_id() {
            query = query.bind(group_id.into_inner());
        }

        let result = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(|model| model.into_comment(kind)))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, kind: PostKind, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            "{} WHERE c.{} = $1{} ORDER BY c.id ASC",
            Self::select_sql(tables),
            tables.post_fk,
            tables.group_filter(2)
        );

        let mut query = sqlx::query_as::<_, CommentModel>(&sql).bind(post_id.into_inner());
        if let Some(group_id) = kind.group_id() {
            query = query.bind(group_id.into_inner());
        }

        let results = query.fetch_all(&self.pool).await.map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|model| model.into_comment(kind))
            .collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let tables = TableSet::for_kind(comment.kind);
        let sql = format!(
            r"
            INSERT INTO {} (id, {}, author_id, content, parent_comment_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
            tables.comments, tables.post_fk
        );

        sqlx::query(&sql)
            .bind(comment.id.into_inner())
            .bind(comment.post_id.into_inner())
            .bind(comment.author_id.into_inner())
            .bind(&comment.content)
            .bind(comment.parent_comment_id.map(|id| id.into_inner()))
            .bind(comment.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let tables = TableSet::for_kind(comment.kind);
        let sql = format!(
            "UPDATE {} SET content = $2, edited_at = $3 WHERE id = $1",
            tables.comments
        );

        let result = sqlx::query(&sql)
            .bind(comment.id.into_inner())
            .bind(&comment.content)
            .bind(comment.edited_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: PostKind, id: Snowflake) -> RepoResult<()> {
        // Replies, media and likes cascade from the comment row
        let tables = TableSet::for_kind(kind);
        let sql = format!(
            "DELETE FROM {comments} c USING {posts} p WHERE c.id = $1 AND p.id = c.{fk}{filter}",
            comments = tables.comments,
            posts = tables.posts,
            fk = tables.post_fk,
            filter = tables.group_filter(2),
        );

        let mut query = sqlx::query(&sql).bind(id.into_inner());
        if let Some(group_id) = kind.group_id() {
            query = query.bind(group_id.into_inner());
        }

        let result = query.execute(&self.pool).await.map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }
}
