//! User service
//!
//! Handles profile reads and updates for the current user.

use social_core::{DomainError, MediaKind, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CurrentUserResponse, UpdateProfileRequest, UserResponse};
use crate::media::UploadedFile;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current user (includes private fields)
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Get a user by ID (public fields only)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(UserResponse::from(&user))
    }

    /// Update the current user's display name
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let display_name = request
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        user.set_display_name(display_name);

        self.ctx.user_repo().update_profile(&user).await?;

        info!(user_id = %user_id, "Profile updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Replace the current user's profile picture
    ///
    /// Only images are accepted.
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn set_avatar(
        &self,
        user_id: Snowflake,
        file: UploadedFile,
    ) -> ServiceResult<CurrentUserResponse> {
        if file.check(self.ctx.media_policy())? != MediaKind::Image {
            return Err(DomainError::UnsupportedMediaType(file.content_type).into());
        }

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let url = self.ctx.media_sink().store(&file).await?;
        user.set_profile_picture(Some(url));

        self.ctx.user_repo().update_profile(&user).await?;

        info!(user_id = %user_id, "Profile picture updated");

        Ok(CurrentUserResponse::from(&user))
    }
}
