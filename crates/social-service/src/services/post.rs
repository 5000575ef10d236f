//! Post service
//!
//! Handles global and group posts. The [`PostKind`] passed to each operation
//! selects the table set; group posts additionally require membership to
//! create.

use std::collections::HashMap;

use social_core::entities::{Media, Post, User};
use social_core::events::PostDeletedEvent;
use social_core::{
    sanitize_content, DomainError, DomainEvent, MediaOwner, PostKind, PostQuery, Snowflake,
    MAX_CONTENT_LENGTH,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreatePostInput, PaginatedResponse, PaginationQuery, PostResponse, PostWithDetails,
};
use crate::media::check_batch;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Sanitize user content and enforce the body rules shared by posts and
/// comments: at most [`MAX_CONTENT_LENGTH`] characters, and not empty
/// unless media is attached.
pub(crate) fn prepare_content(raw: Option<&str>, has_media: bool) -> Result<String, DomainError> {
    let content = raw.map(sanitize_content).unwrap_or_default();

    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: MAX_CONTENT_LENGTH,
        });
    }
    if content.is_empty() && !has_media {
        return Err(DomainError::EmptyContent);
    }

    Ok(content)
}

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post with its media
    ///
    /// Files are validated before anything is written; the post and its media
    /// rows are then stored in one transaction.
    #[instrument(skip(self, input), fields(files = input.media.len()))]
    pub async fn create_post(
        &self,
        kind: PostKind,
        author_id: Snowflake,
        input: CreatePostInput,
    ) -> ServiceResult<PostResponse> {
        if let PostKind::Group(group_id) = kind {
            self.require_member(group_id, author_id).await?;
        }

        let content = prepare_content(input.content.as_deref(), !input.media.is_empty())?;
        let kinds = check_batch(self.ctx.media_policy(), &input.media)?;

        let post = Post::new(self.ctx.generate_id(), kind, author_id, content);

        let mut media = Vec::with_capacity(input.media.len());
        for (file, media_kind) in input.media.iter().zip(kinds) {
            let url = self.ctx.media_sink().store(file).await?;
            media.push(Media::new(self.ctx.generate_id(), post.id, url, media_kind));
        }

        self.ctx.post_repo().create_with_media(&post, &media).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        let author = self.ctx.user_repo().find_by_id(author_id).await?;
        Ok(PostResponse::from(PostWithDetails {
            post,
            media,
            author,
        }))
    }

    /// Get a post with its media and author
    #[instrument(skip(self))]
    pub async fn get_post(&self, kind: PostKind, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(kind, post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let mut responses = self.assemble(kind, vec![post]).await?;
        responses
            .pop()
            .ok_or_else(|| ServiceError::internal("post vanished during assembly"))
    }

    /// List posts newest first
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        kind: PostKind,
        query: PaginationQuery,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        query.validate()?;

        if let PostKind::Group(group_id) = kind {
            self.require_group(group_id).await?;
        }

        let limit = query.limit();
        // Fetch one extra row to learn whether another page exists
        let mut posts = self
            .ctx
            .post_repo()
            .list(
                kind,
                PostQuery {
                    before: query.before,
                    limit: limit + 1,
                },
            )
            .await?;

        let has_more = posts.len() as i64 > limit;
        posts.truncate(usize::try_from(limit).unwrap_or(0));
        let next_before = if has_more {
            posts.last().map(|p| p.id.to_string())
        } else {
            None
        };

        let data = self.assemble(kind, posts).await?;
        Ok(PaginatedResponse::new(data, next_before, has_more, limit))
    }

    /// Delete a post; only its author may do so
    #[instrument(skip(self))]
    pub async fn delete_post(
        &self,
        kind: PostKind,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(kind, post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if !post.is_author(user_id) {
            return Err(DomainError::NotPostAuthor.into());
        }

        self.ctx.post_repo().delete(kind, post_id).await?;

        info!(post_id = %post_id, "Post deleted");

        let event = DomainEvent::PostDeleted(PostDeletedEvent::new(post_id, kind));
        self.ctx
            .publish(
                &event,
                &serde_json::json!({
                    "post_id": post_id,
                    "group_id": kind.group_id(),
                }),
            )
            .await;

        Ok(())
    }

    /// Attach media and authors to a page of posts
    async fn assemble(&self, kind: PostKind, posts: Vec<Post>) -> ServiceResult<Vec<PostResponse>> {
        let ids: Vec<Snowflake> = posts.iter().map(|p| p.id).collect();
        let mut author_ids: Vec<Snowflake> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut media_by_post: HashMap<Snowflake, Vec<Media>> = HashMap::new();
        for media in self
            .ctx
            .media_repo()
            .find_by_owners(kind, MediaOwner::Post, &ids)
            .await?
        {
            media_by_post.entry(media.owner_id).or_default().push(media);
        }

        let authors: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let media = media_by_post.remove(&post.id).unwrap_or_default();
                let author = authors.get(&post.author_id).cloned();
                PostResponse::from(PostWithDetails {
                    post,
                    media,
                    author,
                })
            })
            .collect())
    }

    async fn require_group(&self, group_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.group_repo().find_by_id(group_id).await?.is_none() {
            return Err(DomainError::GroupNotFound(group_id).into());
        }
        Ok(())
    }

    async fn require_member(&self, group_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.require_group(group_id).await?;
        if !self.ctx.group_repo().is_member(group_id, user_id).await? {
            return Err(DomainError::NotGroupMember.into());
        }
        Ok(())
    }
}
