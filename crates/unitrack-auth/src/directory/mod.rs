//! Guild membership lookups.
//!
//! The chat platform owns guilds, members, and roles. Authorization only
//! needs a small profile of the acting member, fetched through
//! [`GuildDirectory`]. The lookup may hit the network when the member is
//! not cached, so it is async and fallible.

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, RoleId, UserId};

pub use memory::StaticGuildDirectory;

/// What authorization needs to know about a member of a guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// The member is the guild's designated owner.
    pub is_guild_owner: bool,
    /// The member holds the platform-native administrator permission.
    pub is_administrator: bool,
    /// Roles the member holds.
    pub roles: Vec<RoleId>,
}

/// Source of guild member profiles.
#[async_trait]
pub trait GuildDirectory: Send + Sync + std::fmt::Debug {
    /// Look up `user` in `guild`.
    ///
    /// Returns `Ok(None)` when the user is not a member of the guild.
    async fn member_profile(&self, guild: GuildId, user: UserId)
    -> AppResult<Option<MemberProfile>>;
}
