//! Admin role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use unitrack_core::types::{GuildId, RoleId};

/// A guild role whose holders may administer unicycles in that guild.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminRole {
    /// Row identifier.
    pub id: i64,
    /// Guild the role belongs to.
    pub guild_id: GuildId,
    /// The role granting admin authority.
    pub role_id: RoleId,
    /// When the role was registered.
    pub created_at: DateTime<Utc>,
}
