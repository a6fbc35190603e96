//! Unicycle CRUD with ownership and custody rules.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, UserId};
use unitrack_database::repositories::{UnicycleQuery, UnicycleRepository};
use unitrack_entity::unicycle::{
    CreateUnicycle, CustodyMove, Ownership, OwnershipChange, Unicycle, UpdateUnicycle,
};

use super::filter::{self, ListFilter, ListResult, Suggestion};
use crate::context::RequestContext;
use crate::transfer::{PendingTransferStore, TransferKey};

/// Literal the caller must type to remove a unicycle.
const CONFIRM_LITERAL: &str = "confirm";

/// Longest accepted name. Leaves room for the `#n: ` prefix within the
/// platform's 100-character autocomplete label.
pub const MAX_NAME_CHARS: usize = 90;

/// Longest accepted description.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Fields of an edit request. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnicycleEdit {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New individual owner.
    pub owner: Option<UserId>,
    /// Hand the unicycle to the club.
    pub collective: bool,
}

impl UnicycleEdit {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.owner.is_none() && !self.collective
    }
}

/// An applied edit and a line per changed field.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The unicycle after the edit.
    pub unicycle: Unicycle,
    /// Human-readable change lines.
    pub changes: Vec<String>,
}

/// Manages unicycle lifecycle operations.
#[derive(Debug, Clone)]
pub struct UnicycleService {
    /// Unicycle repository.
    repo: Arc<UnicycleRepository>,
    /// Pending transfers, dropped when their unicycle is removed.
    transfers: Arc<PendingTransferStore>,
}

impl UnicycleService {
    /// Creates a new unicycle service.
    pub fn new(repo: Arc<UnicycleRepository>, transfers: Arc<PendingTransferStore>) -> Self {
        Self { repo, transfers }
    }

    /// Add a unicycle owned and held by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Unicycle> {
        let name = validate_name(name)?;
        let description = validate_description(description.as_deref().unwrap_or_default())?;
        let unicycle = self
            .repo
            .create(&CreateUnicycle {
                guild_id: ctx.guild_id,
                name,
                description,
                creator: ctx.user_id(),
            })
            .await?;

        info!(
            guild_id = %ctx.guild_id,
            user_id = %ctx.user_id(),
            unicycle = unicycle.guild_specific_id,
            name = %unicycle.name,
            "Unicycle added"
        );

        Ok(unicycle)
    }

    /// Look up a unicycle by number.
    pub async fn get(&self, ctx: &RequestContext, number: i64) -> AppResult<Unicycle> {
        self.find(ctx.guild_id, number).await
    }

    /// Change name, description, or ownership.
    ///
    /// The owner or an admin may edit; only admins may hand a unicycle to
    /// the club. Custody follows an ownership change when the custodian was
    /// the previous owner.
    pub async fn edit(
        &self,
        ctx: &RequestContext,
        number: i64,
        edit: UnicycleEdit,
    ) -> AppResult<EditOutcome> {
        if edit.is_empty() {
            return Err(AppError::validation("No changes were provided"));
        }
        if edit.owner.is_some() && edit.collective {
            return Err(AppError::validation(
                "Choose either a new owner or club ownership, not both.",
            ));
        }

        let mut unicycle = self.find(ctx.guild_id, number).await?;
        if !ctx.actor.can_edit(&unicycle) {
            return Err(AppError::authorization(
                "You can only edit unicycles you own.",
            ));
        }
        if edit.collective {
            ctx.actor.require_admin("make a unicycle club-owned")?;
        }

        let mut changes = Vec::new();
        let mut update = UpdateUnicycle::default();

        if let Some(name) = edit.name.as_deref() {
            let name = validate_name(name)?;
            if name != unicycle.name {
                if let Some(existing) = self.repo.find_by_name(ctx.guild_id, &name).await? {
                    if existing.id != unicycle.id {
                        return Err(AppError::conflict(format!(
                            "A unicycle named '{name}' already exists in this server!"
                        )));
                    }
                }
                changes.push(format!("Name: {} → {}", unicycle.name, name));
                unicycle.name = name.clone();
                update.name = Some(name);
            }
        }

        if let Some(description) = edit.description {
            let description = validate_description(&description)?;
            if description != unicycle.description {
                changes.push("Description updated".to_string());
                unicycle.description = description.clone();
                update.description = Some(description);
            }
        }

        let new_owner = match (edit.owner, edit.collective) {
            (Some(user), _) => Some(Ownership::Member(user)),
            (None, true) => Some(Ownership::Collective),
            (None, false) => None,
        };
        if let Some(new_owner) = new_owner.filter(|o| *o != unicycle.owner) {
            let previous = unicycle.owner;
            let held_by = unicycle.custodian;
            let moved = unicycle.apply_ownership_change(OwnershipChange {
                new_owner,
                acting: ctx.user_id(),
            });
            changes.push(format!("Owner: {} → {}", previous.display(), new_owner.display()));
            update.owner = Some(new_owner);
            if moved {
                changes.push(format!("Custody: {}", unicycle.custodian.mention()));
                update.custody = Some(CustodyMove {
                    from: held_by,
                    to: unicycle.custodian,
                });
            }
        }

        if update.is_empty() {
            return Ok(EditOutcome {
                unicycle,
                changes,
            });
        }

        let unicycle = self.repo.update(ctx.guild_id, number, &update).await?;

        info!(
            guild_id = %ctx.guild_id,
            user_id = %ctx.user_id(),
            unicycle = number,
            changes = changes.len(),
            "Unicycle edited"
        );

        Ok(EditOutcome { unicycle, changes })
    }

    /// Permanently remove a unicycle. Its number is never reused.
    pub async fn remove(&self, ctx: &RequestContext, number: i64, confirm: &str) -> AppResult<Unicycle> {
        if !confirm.trim().eq_ignore_ascii_case(CONFIRM_LITERAL) {
            return Err(AppError::validation(
                "Removal cancelled. Type `confirm` to remove the unicycle.",
            ));
        }

        let unicycle = self.find(ctx.guild_id, number).await?;
        if !ctx.actor.can_remove(&unicycle) {
            return Err(AppError::authorization(
                "You can only remove unicycles you own.",
            ));
        }

        if !self.repo.delete(ctx.guild_id, number).await? {
            return Err(not_found(number));
        }
        self.transfers.discard(TransferKey::new(ctx.guild_id, number));

        info!(
            guild_id = %ctx.guild_id,
            user_id = %ctx.user_id(),
            unicycle = number,
            name = %unicycle.name,
            "Unicycle removed"
        );

        Ok(unicycle)
    }

    /// List unicycles matching `filter`.
    pub async fn list(&self, ctx: &RequestContext, filter: &ListFilter) -> AppResult<ListResult> {
        let (query, applied) = filter.to_query(ctx.guild_id, ctx.is_admin())?;
        let unicycles = self.repo.search(&query).await?;
        Ok(ListResult { unicycles, applied })
    }

    /// Autocomplete choices for a unicycle argument.
    pub async fn suggest(&self, guild_id: GuildId, partial: &str) -> AppResult<Vec<Suggestion>> {
        let unicycles = self.repo.search(&UnicycleQuery::all(guild_id)).await?;
        Ok(filter::suggest(&unicycles, partial))
    }

    async fn find(&self, guild_id: GuildId, number: i64) -> AppResult<Unicycle> {
        self.repo
            .find_by_number(guild_id, number)
            .await?
            .ok_or_else(|| not_found(number))
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("The unicycle name cannot be empty."));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(AppError::validation(format!(
            "The unicycle name can be at most {MAX_NAME_CHARS} characters."
        )));
    }
    Ok(name.to_string())
}

/// Trimmed description, `None` when blank.
fn validate_description(description: &str) -> AppResult<Option<String>> {
    let description = description.trim();
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(AppError::validation(format!(
            "The description can be at most {MAX_DESCRIPTION_CHARS} characters."
        )));
    }
    Ok(Some(description.to_string()).filter(|d| !d.is_empty()))
}

fn not_found(number: i64) -> AppError {
    AppError::not_found(format!("Unicycle #{number} not found in this server!"))
}
