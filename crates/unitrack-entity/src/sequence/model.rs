//! Guild sequence entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use unitrack_core::types::GuildId;

/// Source of guild-scoped unicycle numbers.
///
/// Created lazily on the first unicycle in a guild. `last_value` only ever
/// grows, so numbers of removed unicycles are never handed out again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GuildSequence {
    /// Guild the counter belongs to.
    pub guild_id: GuildId,
    /// Last number handed out.
    pub last_value: i64,
}
