//! Group service
//!
//! Handles group creation and membership. The creator joins at creation and
//! cannot leave the group.

use social_core::entities::Group;
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateGroupRequest, GroupResponse, GroupWithCount, MembershipResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    /// Create a new GroupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all groups with member counts, by name
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> ServiceResult<Vec<GroupResponse>> {
        let groups = self.ctx.group_repo().list().await?;
        Ok(groups
            .into_iter()
            .map(|(group, member_count)| GroupResponse::from(GroupWithCount { group, member_count }))
            .collect())
    }

    /// Create a group owned by the caller
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_group(
        &self,
        creator_id: Snowflake,
        request: CreateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        request.validate()?;

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let group = Group::new(
            self.ctx.generate_id(),
            request.name.trim().to_string(),
            description,
            creator_id,
        );

        self.ctx.group_repo().create(&group).await?;

        info!(group_id = %group.id, creator_id = %creator_id, "Group created");

        Ok(GroupResponse::from(GroupWithCount {
            group,
            member_count: 1,
        }))
    }

    /// Get a group with its member count
    #[instrument(skip(self))]
    pub async fn get_group(&self, group_id: Snowflake) -> ServiceResult<GroupResponse> {
        let group = self.find_group(group_id).await?;
        let member_count = self.ctx.group_repo().member_count(group_id).await?;
        Ok(GroupResponse::from(GroupWithCount {
            group,
            member_count,
        }))
    }

    /// Join a group; joining twice is a no-op
    #[instrument(skip(self))]
    pub async fn join_group(&self, group_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        self.find_group(group_id).await?;
        if self.ctx.group_repo().add_member(group_id, user_id).await? {
            info!(group_id = %group_id, user_id = %user_id, "Member joined");
        }
        Ok(())
    }

    /// Leave a group
    #[instrument(skip(self))]
    pub async fn leave_group(&self, group_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let group = self.find_group(group_id).await?;
        if group.is_creator(user_id) {
            return Err(DomainError::CannotLeaveOwnedGroup.into());
        }

        self.ctx.group_repo().remove_member(group_id, user_id).await?;

        info!(group_id = %group_id, user_id = %user_id, "Member left");
        Ok(())
    }

    /// Whether the user belongs to the group
    #[instrument(skip(self))]
    pub async fn membership(
        &self,
        group_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MembershipResponse> {
        self.find_group(group_id).await?;
        let is_member = self.ctx.group_repo().is_member(group_id, user_id).await?;
        Ok(MembershipResponse {
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            is_member,
        })
    }

    async fn find_group(&self, group_id: Snowflake) -> ServiceResult<Group> {
        Ok(self
            .ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?)
    }
}
