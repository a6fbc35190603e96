//! Guild sequence repository implementation.

use sqlx::{SqliteConnection, SqlitePool};

use unitrack_core::result::AppResult;
use unitrack_core::types::GuildId;
use unitrack_entity::sequence::GuildSequence;

use crate::error::map_error;

/// Repository for the per-guild unicycle number counters.
#[derive(Debug, Clone)]
pub struct GuildSequenceRepository {
    pool: SqlitePool,
}

impl GuildSequenceRepository {
    /// Create a new sequence repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Allocate the next number for a guild on an open connection.
    ///
    /// Creates the counter on first use. Run this inside the transaction
    /// that inserts the unicycle so the increment rolls back with it.
    pub async fn next_value(conn: &mut SqliteConnection, guild_id: GuildId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO guild_sequences (guild_id, last_value) VALUES (?, 1) \
             ON CONFLICT (guild_id) DO UPDATE SET last_value = last_value + 1 \
             RETURNING last_value",
        )
        .bind(guild_id)
        .fetch_one(conn)
        .await
        .map_err(|e| map_error("Failed to allocate unicycle number", e))
    }

    /// Current counter for a guild, if one exists.
    pub async fn find(&self, guild_id: GuildId) -> AppResult<Option<GuildSequence>> {
        sqlx::query_as::<_, GuildSequence>("SELECT * FROM guild_sequences WHERE guild_id = ?")
            .bind(guild_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_error("Failed to read guild sequence", e))
    }
}
