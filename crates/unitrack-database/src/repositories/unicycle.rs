//! Unicycle repository implementation.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, UserId};
use unitrack_entity::unicycle::ownership::COLLECTIVE_SENTINEL;
use unitrack_entity::unicycle::{CreateUnicycle, Ownership, Unicycle, UpdateUnicycle};

use super::sequence::GuildSequenceRepository;
use crate::error::{map_error, map_write_error};

/// Filters for listing the unicycles of one guild.
#[derive(Debug, Clone)]
pub struct UnicycleQuery {
    /// Guild to list.
    pub guild_id: GuildId,
    /// Only unicycles with this owner.
    pub owner: Option<Ownership>,
    /// Hide collectively owned unicycles.
    pub exclude_collective: bool,
    /// Only unicycles held by this member.
    pub custodian: Option<UserId>,
    /// Case-insensitive substring of the name or description.
    pub search_text: Option<String>,
}

impl UnicycleQuery {
    /// Every unicycle in a guild.
    pub fn all(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            owner: None,
            exclude_collective: false,
            custodian: None,
            search_text: None,
        }
    }
}

/// Repository for unicycle CRUD and listing.
#[derive(Debug, Clone)]
pub struct UnicycleRepository {
    pool: SqlitePool,
}

impl UnicycleRepository {
    /// Create a new unicycle repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a unicycle by its guild-scoped number.
    pub async fn find_by_number(&self, guild_id: GuildId, number: i64) -> AppResult<Option<Unicycle>> {
        sqlx::query_as::<_, Unicycle>(
            "SELECT * FROM unicycles WHERE guild_id = ? AND guild_specific_id = ?",
        )
        .bind(guild_id)
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error("Failed to find unicycle", e))
    }

    /// Find a unicycle by its exact name.
    pub async fn find_by_name(&self, guild_id: GuildId, name: &str) -> AppResult<Option<Unicycle>> {
        sqlx::query_as::<_, Unicycle>("SELECT * FROM unicycles WHERE guild_id = ? AND name = ?")
            .bind(guild_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_error("Failed to find unicycle by name", e))
    }

    /// Create a unicycle, allocating the next guild-scoped number.
    ///
    /// The counter increment and the insert share one transaction.
    pub async fn create(&self, data: &CreateUnicycle) -> AppResult<Unicycle> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_error("Failed to begin transaction", e))?;

        let number = GuildSequenceRepository::next_value(&mut *tx, data.guild_id).await?;
        let now = Utc::now();

        let unicycle = sqlx::query_as::<_, Unicycle>(
            "INSERT INTO unicycles (guild_id, guild_specific_id, name, description, owner_id, \
             custody_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(data.guild_id)
        .bind(number)
        .bind(&data.name)
        .bind(&data.description)
        .bind(Ownership::Member(data.creator))
        .bind(data.creator)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_write_error(
                "Failed to create unicycle",
                || format!("A unicycle named '{}' already exists in this server!", data.name),
                e,
            )
        })?;

        tx.commit()
            .await
            .map_err(|e| map_error("Failed to commit unicycle", e))?;

        debug!(guild_id = %data.guild_id, number, "Unicycle row inserted");
        Ok(unicycle)
    }

    /// Write the columns set in `changes`, leaving every other column as stored.
    ///
    /// A custody move only applies while its expected custodian still holds
    /// the unicycle, so a transfer committed in between is kept.
    pub async fn update(
        &self,
        guild_id: GuildId,
        number: i64,
        changes: &UpdateUnicycle,
    ) -> AppResult<Unicycle> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE unicycles SET updated_at = ");
        builder.push_bind(Utc::now());

        if let Some(name) = &changes.name {
            builder.push(", name = ").push_bind(name.clone());
        }
        if let Some(description) = &changes.description {
            builder.push(", description = ").push_bind(description.clone());
        }
        if let Some(owner) = changes.owner {
            builder.push(", owner_id = ").push_bind(owner);
        }
        if let Some(custody) = changes.custody {
            builder
                .push(", custody_id = CASE WHEN custody_id = ")
                .push_bind(custody.from)
                .push(" THEN ")
                .push_bind(custody.to)
                .push(" ELSE custody_id END");
        }

        builder
            .push(" WHERE guild_id = ")
            .push_bind(guild_id)
            .push(" AND guild_specific_id = ")
            .push_bind(number)
            .push(" RETURNING *");

        builder
            .build_query_as::<Unicycle>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(
                    "Failed to update unicycle",
                    || match &changes.name {
                        Some(name) => format!("A unicycle named '{name}' already exists in this server!"),
                        None => "A unicycle with that name already exists in this server!".to_string(),
                    },
                    e,
                )
            })?
            .ok_or_else(|| AppError::not_found(format!("Unicycle #{number} not found in this server!")))
    }

    /// Hand custody of a unicycle to `custodian`.
    ///
    /// Returns `None` when the unicycle no longer exists.
    pub async fn set_custodian(
        &self,
        guild_id: GuildId,
        number: i64,
        custodian: UserId,
    ) -> AppResult<Option<Unicycle>> {
        sqlx::query_as::<_, Unicycle>(
            "UPDATE unicycles SET custody_id = ?, updated_at = ? \
             WHERE guild_id = ? AND guild_specific_id = ? RETURNING *",
        )
        .bind(custodian)
        .bind(Utc::now())
        .bind(guild_id)
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_error("Failed to update custody", e))
    }

    /// Delete a unicycle. Its number is not reused.
    pub async fn delete(&self, guild_id: GuildId, number: i64) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM unicycles WHERE guild_id = ? AND guild_specific_id = ?")
                .bind(guild_id)
                .bind(number)
                .execute(&self.pool)
                .await
                .map_err(|e| map_error("Failed to delete unicycle", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// List unicycles matching a query, ordered by number.
    pub async fn search(&self, query: &UnicycleQuery) -> AppResult<Vec<Unicycle>> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM unicycles WHERE guild_id = ");
        builder.push_bind(query.guild_id);

        if let Some(owner) = query.owner {
            builder.push(" AND owner_id = ").push_bind(owner);
        }
        if query.exclude_collective {
            builder.push(" AND owner_id <> ").push_bind(COLLECTIVE_SENTINEL);
        }
        if let Some(custodian) = query.custodian {
            builder.push(" AND custody_id = ").push_bind(custodian);
        }
        if let Some(text) = query.search_text.as_deref().filter(|t| !t.is_empty()) {
            let pattern = like_pattern(text);
            builder
                .push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR COALESCE(description, '') LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        builder.push(" ORDER BY guild_specific_id");

        builder
            .build_query_as::<Unicycle>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_error("Failed to list unicycles", e))
    }
}

/// Build a `LIKE` pattern matching `text` anywhere, with wildcards escaped.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
