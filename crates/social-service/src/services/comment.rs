//! Comment service
//!
//! Comments and replies share one table per post kind. A reply points at a
//! top-level comment on the same post; replies to replies are rejected.
//!
//! Media attached to a new comment is stored concurrently after the comment
//! row exists. Each file succeeds or fails on its own: failures are reported
//! back to the caller as a partial result and never remove the comment.

use std::collections::HashMap;

use futures::future::join_all;
use social_core::entities::{Comment, LikeSummary, Media, User};
use social_core::events::{CommentCreatedEvent, CommentDeletedEvent, CommentUpdatedEvent};
use social_core::{DomainError, DomainEvent, MediaKind, MediaOwner, PostKind, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    CommentCreated, CommentResponse, CommentWithDetails, CreateCommentInput, FailedMedia,
    UpdateCommentRequest,
};
use crate::media::{check_batch, UploadedFile};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::prepare_content;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a comment or reply
    ///
    /// Returns [`CommentCreated::Partial`] when the comment was stored but at
    /// least one media file was not; in that case the room is not notified.
    #[instrument(skip(self, input), fields(post_id = %input.post_id, files = input.media.len()))]
    pub async fn create_comment(
        &self,
        author_id: Snowflake,
        input: CreateCommentInput,
    ) -> ServiceResult<CommentCreated> {
        let content = prepare_content(input.content.as_deref(), !input.media.is_empty())?;
        let kind = PostKind::from_group(input.group_id);
        let post_id = input.post_id;

        if self.ctx.post_repo().find_by_id(kind, post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        if let Some(parent_id) = input.parent_comment_id {
            let parent = self
                .ctx
                .comment_repo()
                .find_by_id(kind, parent_id)
                .await?
                .filter(|parent| parent.post_id == post_id)
                .ok_or(DomainError::ParentCommentNotFound(parent_id))?;

            if parent.is_reply() {
                return Err(DomainError::NestedReply.into());
            }
        }

        let kinds = check_batch(self.ctx.media_policy(), &input.media)?;

        let id = self.ctx.generate_id();
        let comment = match input.parent_comment_id {
            Some(parent_id) => Comment::new_reply(id, kind, post_id, author_id, content, parent_id),
            None => Comment::new(id, kind, post_id, author_id, content),
        };
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, reply = comment.is_reply(), "Comment created");

        let uploads = input
            .media
            .iter()
            .zip(kinds)
            .map(|(file, media_kind)| self.attach(&comment, file, media_kind));
        let mut media = Vec::new();
        let mut failed_media = Vec::new();
        for (file, outcome) in input.media.iter().zip(join_all(uploads).await) {
            match outcome {
                Ok(item) => media.push(item),
                Err(e) => {
                    warn!(comment_id = %comment.id, file_name = %file.file_name, error = %e, "Comment media failed");
                    failed_media.push(FailedMedia {
                        file_name: file.file_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let author = self.ctx.user_repo().find_by_id(author_id).await?;
        let response = CommentResponse::from(CommentWithDetails {
            comment: comment.clone(),
            media,
            author,
            likes: None,
        });

        if !failed_media.is_empty() {
            return Ok(CommentCreated::Partial {
                comment: response,
                failed_media,
            });
        }

        let event = DomainEvent::CommentCreated(CommentCreatedEvent::new(
            comment.id,
            post_id,
            kind,
            comment.parent_comment_id,
            author_id,
        ));
        self.ctx.publish(&event, &response).await;

        Ok(CommentCreated::Complete(response))
    }

    /// Store one file and record it against the comment
    async fn attach(
        &self,
        comment: &Comment,
        file: &UploadedFile,
        media_kind: MediaKind,
    ) -> Result<Media, DomainError> {
        let url = self.ctx.media_sink().store(file).await?;
        let media = Media::new(self.ctx.generate_id(), comment.id, url, media_kind);
        self.ctx
            .media_repo()
            .create(comment.kind, MediaOwner::Comment, &media)
            .await?;
        Ok(media)
    }

    /// List a post's comments with their replies nested, oldest first
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        kind: PostKind,
        post_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        if self.ctx.post_repo().find_by_id(kind, post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let comments = self.ctx.comment_repo().find_by_post(kind, post_id).await?;
        let flat = self.assemble(kind, comments, viewer_id).await?;

        let (replies, mut top_level): (Vec<_>, Vec<_>) =
            flat.into_iter().partition(|c| c.parent_comment_id.is_some());

        let mut by_parent: HashMap<String, Vec<CommentResponse>> = HashMap::new();
        for reply in replies {
            if let Some(parent_id) = reply.parent_comment_id.clone() {
                by_parent.entry(parent_id).or_default().push(reply);
            }
        }
        for comment in &mut top_level {
            comment.replies = by_parent.remove(&comment.id).unwrap_or_default();
        }

        Ok(top_level)
    }

    /// Edit a comment's content; only its author may do so
    #[instrument(skip(self, request))]
    pub async fn edit_comment(
        &self,
        comment_id: Snowflake,
        user_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let kind = PostKind::from_group(request.group_id);

        let mut comment = self.find_comment(kind, comment_id).await?;
        if !comment.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        let content = prepare_content(Some(&request.content), false)?;
        comment.edit(content);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, "Comment edited");

        let post_id = comment.post_id;
        let response = self
            .assemble(kind, vec![comment], user_id)
            .await?
            .pop()
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        let event =
            DomainEvent::CommentUpdated(CommentUpdatedEvent::new(comment_id, post_id, kind));
        self.ctx.publish(&event, &response).await;

        Ok(response)
    }

    /// Delete a comment with its replies and media; only its author may do so
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        kind: PostKind,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self.find_comment(kind, comment_id).await?;
        if !comment.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        self.ctx.comment_repo().delete(kind, comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");

        let event = DomainEvent::CommentDeleted(CommentDeletedEvent::new(
            comment_id,
            comment.post_id,
            kind,
            comment.parent_comment_id,
        ));
        self.ctx
            .publish(
                &event,
                &serde_json::json!({
                    "comment_id": comment_id,
                    "post_id": comment.post_id,
                    "parent_comment_id": comment.parent_comment_id,
                    "group_id": kind.group_id(),
                }),
            )
            .await;

        Ok(())
    }

    /// Like a comment or reply; liking twice is a no-op
    #[instrument(skip(self))]
    pub async fn like(
        &self,
        kind: PostKind,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.find_comment(kind, comment_id).await?;
        self.ctx.like_repo().like(kind, comment_id, user_id).await?;
        Ok(())
    }

    /// Remove a like; removing a missing like is a no-op
    #[instrument(skip(self))]
    pub async fn unlike(
        &self,
        kind: PostKind,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.find_comment(kind, comment_id).await?;
        self.ctx.like_repo().unlike(kind, comment_id, user_id).await?;
        Ok(())
    }

    async fn find_comment(&self, kind: PostKind, comment_id: Snowflake) -> ServiceResult<Comment> {
        Ok(self
            .ctx
            .comment_repo()
            .find_by_id(kind, comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?)
    }

    /// Attach media, authors and like data to comments, preserving order
    async fn assemble(
        &self,
        kind: PostKind,
        comments: Vec<Comment>,
        viewer_id: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let ids: Vec<Snowflake> = comments.iter().map(|c| c.id).collect();
        let mut author_ids: Vec<Snowflake> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut media_by_comment: HashMap<Snowflake, Vec<Media>> = HashMap::new();
        for media in self
            .ctx
            .media_repo()
            .find_by_owners(kind, MediaOwner::Comment, &ids)
            .await?
        {
            media_by_comment.entry(media.owner_id).or_default().push(media);
        }

        let mut likes: HashMap<Snowflake, LikeSummary> = self
            .ctx
            .like_repo()
            .summaries(kind, &ids, viewer_id)
            .await?
            .into_iter()
            .map(|s| (s.comment_id, s))
            .collect();

        let authors: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(comments
            .into_iter()
            .map(|comment| {
                let media = media_by_comment.remove(&comment.id).unwrap_or_default();
                let likes = likes.remove(&comment.id);
                let author = authors.get(&comment.author_id).cloned();
                CommentResponse::from(CommentWithDetails {
                    comment,
                    media,
                    author,
                    likes,
                })
            })
            .collect())
    }
}
