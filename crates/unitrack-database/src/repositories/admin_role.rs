//! Admin role repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, RoleId};
use unitrack_entity::admin_role::AdminRole;

use crate::error::{map_error, map_write_error};

/// Repository for per-guild admin role registrations.
#[derive(Debug, Clone)]
pub struct AdminRoleRepository {
    pool: SqlitePool,
}

impl AdminRoleRepository {
    /// Create a new admin role repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List the admin roles registered in a guild.
    pub async fn find_by_guild(&self, guild_id: GuildId) -> AppResult<Vec<AdminRole>> {
        sqlx::query_as::<_, AdminRole>(
            "SELECT * FROM admin_roles WHERE guild_id = ? ORDER BY created_at, id",
        )
        .bind(guild_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_error("Failed to list admin roles", e))
    }

    /// Role identifiers registered as admin roles in a guild.
    pub async fn role_ids(&self, guild_id: GuildId) -> AppResult<Vec<RoleId>> {
        sqlx::query_scalar::<_, RoleId>("SELECT role_id FROM admin_roles WHERE guild_id = ?")
            .bind(guild_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_error("Failed to load admin role ids", e))
    }

    /// Register a role as an admin role.
    pub async fn create(&self, guild_id: GuildId, role_id: RoleId) -> AppResult<AdminRole> {
        sqlx::query_as::<_, AdminRole>(
            "INSERT INTO admin_roles (guild_id, role_id, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(guild_id)
        .bind(role_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                "Failed to add admin role",
                || format!("Role {} is already an admin role!", role_id.mention()),
                e,
            )
        })
    }

    /// Remove an admin role registration.
    pub async fn delete(&self, guild_id: GuildId, role_id: RoleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM admin_roles WHERE guild_id = ? AND role_id = ?")
            .bind(guild_id)
            .bind(role_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_error("Failed to remove admin role", e))?;
        Ok(result.rows_affected() > 0)
    }
}
