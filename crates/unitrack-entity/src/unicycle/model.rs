//! Unicycle entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use unitrack_core::types::{GuildId, UserId};

use super::ownership::Ownership;

/// A tracked unicycle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Unicycle {
    /// Row identifier (global, never shown to users).
    pub id: i64,
    /// Guild the unicycle belongs to.
    pub guild_id: GuildId,
    /// Number unique within the guild, shown as `#n`.
    pub guild_specific_id: i64,
    /// Name, unique within the guild.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owner: a member or the collective.
    #[sqlx(rename = "owner_id")]
    pub owner: Ownership,
    /// Member currently holding the unicycle.
    #[sqlx(rename = "custody_id")]
    pub custodian: UserId,
    /// When the unicycle was added.
    pub created_at: DateTime<Utc>,
    /// When the unicycle was last edited or transferred.
    pub updated_at: DateTime<Utc>,
}

impl Unicycle {
    /// `#n: name` label used in lists and autocomplete.
    pub fn label(&self) -> String {
        format!("#{}: {}", self.guild_specific_id, self.name)
    }

    /// Description or an empty string.
    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Whether `user` currently holds the unicycle.
    pub fn is_in_custody_of(&self, user: UserId) -> bool {
        self.custodian == user
    }

    /// Whether `user` is the individual owner.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner.is_member(user)
    }

    /// Apply an ownership change, moving custody along with it.
    ///
    /// Custody only follows when the custodian was the prior owner. It goes
    /// to the new owner, or to the acting member when the new owner is the
    /// collective. Returns whether custody moved.
    pub fn apply_ownership_change(&mut self, change: OwnershipChange) -> bool {
        let custody_follows = self.owner.is_member(self.custodian);
        self.owner = change.new_owner;

        if !custody_follows {
            return false;
        }

        let next = match change.new_owner {
            Ownership::Member(user) => user,
            Ownership::Collective => change.acting,
        };
        let moved = next != self.custodian;
        self.custodian = next;
        moved
    }
}

/// A requested ownership change and who requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipChange {
    /// The new owner.
    pub new_owner: Ownership,
    /// Member performing the change.
    pub acting: UserId,
}

/// Data required to create a new unicycle.
///
/// The creator becomes both owner and custodian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUnicycle {
    /// Guild the unicycle belongs to.
    pub guild_id: GuildId,
    /// Name, unique within the guild.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Member adding the unicycle.
    pub creator: UserId,
}

/// Data for editing an existing unicycle. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUnicycle {
    /// New name.
    pub name: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New owner.
    pub owner: Option<Ownership>,
    /// Custody hand-off that accompanies an ownership change.
    pub custody: Option<CustodyMove>,
}

impl UpdateUnicycle {
    /// Whether no column would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.owner.is_none() && self.custody.is_none()
    }
}

/// Move custody from `from` to `to`, only if `from` still holds the unicycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyMove {
    /// Custodian observed when the edit was prepared.
    pub from: UserId,
    /// Next custodian.
    pub to: UserId,
}
