//! Admin role service.

use std::sync::Arc;

use tracing::info;

use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::RoleId;
use unitrack_database::repositories::AdminRoleRepository;
use unitrack_entity::admin_role::AdminRole;

use crate::context::RequestContext;

/// Manages the roles that grant unicycle admin rights in a guild.
#[derive(Debug, Clone)]
pub struct AdminRoleService {
    /// Admin role repository.
    repo: Arc<AdminRoleRepository>,
}

impl AdminRoleService {
    /// Creates a new admin role service.
    pub fn new(repo: Arc<AdminRoleRepository>) -> Self {
        Self { repo }
    }

    /// Register `role` as an admin role. Guild owner or administrator only.
    pub async fn add(&self, ctx: &RequestContext, role: RoleId) -> AppResult<AdminRole> {
        ctx.actor.require_role_manager()?;
        let created = self.repo.create(ctx.guild_id, role).await?;

        info!(
            guild_id = %ctx.guild_id,
            user_id = %ctx.user_id(),
            role_id = %role,
            "Admin role added"
        );

        Ok(created)
    }

    /// Unregister `role`. Guild owner or administrator only.
    pub async fn remove(&self, ctx: &RequestContext, role: RoleId) -> AppResult<()> {
        ctx.actor.require_role_manager()?;
        if !self.repo.delete(ctx.guild_id, role).await? {
            return Err(AppError::not_found(format!(
                "Role {} is not an admin role!",
                role.mention()
            )));
        }

        info!(
            guild_id = %ctx.guild_id,
            user_id = %ctx.user_id(),
            role_id = %role,
            "Admin role removed"
        );

        Ok(())
    }

    /// Admin roles of the caller's guild.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<AdminRole>> {
        self.repo.find_by_guild(ctx.guild_id).await
    }
}
