//! In-memory guild directory for single-process setups and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, RoleId, UserId};

use super::{GuildDirectory, MemberProfile};

/// A directory backed by a map of explicitly registered members.
#[derive(Debug, Default)]
pub struct StaticGuildDirectory {
    members: DashMap<(GuildId, UserId), MemberProfile>,
}

impl StaticGuildDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a member profile.
    pub fn insert(&self, guild: GuildId, user: UserId, profile: MemberProfile) {
        self.members.insert((guild, user), profile);
    }

    /// Register a plain member holding `roles`.
    pub fn add_member(&self, guild: GuildId, user: UserId, roles: Vec<RoleId>) {
        self.insert(
            guild,
            user,
            MemberProfile {
                roles,
                ..MemberProfile::default()
            },
        );
    }

    /// Register the guild owner.
    pub fn add_owner(&self, guild: GuildId, user: UserId) {
        self.insert(
            guild,
            user,
            MemberProfile {
                is_guild_owner: true,
                ..MemberProfile::default()
            },
        );
    }

    /// Register a member with the platform administrator permission.
    pub fn add_administrator(&self, guild: GuildId, user: UserId) {
        self.insert(
            guild,
            user,
            MemberProfile {
                is_administrator: true,
                ..MemberProfile::default()
            },
        );
    }

    /// Remove a member.
    pub fn remove(&self, guild: GuildId, user: UserId) {
        self.members.remove(&(guild, user));
    }
}

#[async_trait]
impl GuildDirectory for StaticGuildDirectory {
    async fn member_profile(
        &self,
        guild: GuildId,
        user: UserId,
    ) -> AppResult<Option<MemberProfile>> {
        let profile = self.members.get(&(guild, user)).map(|p| p.value().clone());
        debug!(%guild, %user, found = profile.is_some(), "Static directory lookup");
        Ok(profile)
    }
}
