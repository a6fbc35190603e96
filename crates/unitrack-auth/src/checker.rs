//! Resolves an actor's capabilities once per request.

use std::sync::Arc;

use tracing::debug;

use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, UserId};
use unitrack_database::repositories::AdminRoleRepository;

use crate::actor::Actor;
use crate::capability::{Capability, CapabilitySet};
use crate::directory::GuildDirectory;

/// Computes the capability set of a member in a guild.
///
/// Consults the platform for owner and administrator status and the
/// store for the guild's configured admin roles.
#[derive(Debug, Clone)]
pub struct AuthorizationChecker {
    /// Platform membership lookups.
    directory: Arc<dyn GuildDirectory>,
    /// Configured admin roles.
    admin_roles: Arc<AdminRoleRepository>,
}

impl AuthorizationChecker {
    /// Creates a new checker.
    pub fn new(directory: Arc<dyn GuildDirectory>, admin_roles: Arc<AdminRoleRepository>) -> Self {
        Self {
            directory,
            admin_roles,
        }
    }

    /// Resolve the actor for `user` in `guild`.
    ///
    /// A user the platform does not know as a member gets no capabilities.
    pub async fn actor(&self, guild: GuildId, user: UserId) -> AppResult<Actor> {
        let capabilities = self.capabilities(guild, user).await?;
        debug!(guild_id = %guild, user_id = %user, %capabilities, "Resolved capabilities");
        Ok(Actor::new(user, capabilities))
    }

    /// `isAdmin(actor, guild)`.
    pub async fn is_admin(&self, guild: GuildId, user: UserId) -> AppResult<bool> {
        Ok(self.capabilities(guild, user).await?.is_admin())
    }

    async fn capabilities(&self, guild: GuildId, user: UserId) -> AppResult<CapabilitySet> {
        let Some(profile) = self.directory.member_profile(guild, user).await? else {
            return Ok(CapabilitySet::empty());
        };

        let mut capabilities = CapabilitySet::empty();
        if profile.is_guild_owner {
            capabilities.grant(Capability::GuildOwner);
        }
        if profile.is_administrator {
            capabilities.grant(Capability::PlatformAdministrator);
        }
        if !profile.roles.is_empty() {
            let configured = self.admin_roles.role_ids(guild).await?;
            if profile.roles.iter().any(|r| configured.contains(r)) {
                capabilities.grant(Capability::AdminRole);
            }
        }
        Ok(capabilities)
    }
}
