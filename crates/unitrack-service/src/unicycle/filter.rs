//! List filters and autocomplete matching.

use serde::{Deserialize, Serialize};

use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, UserId};
use unitrack_database::repositories::UnicycleQuery;
use unitrack_entity::unicycle::{Ownership, Unicycle};

/// Most entries the platform shows in one list or autocomplete response.
pub const MAX_CHOICES: usize = 25;

/// Longest autocomplete label the platform accepts.
pub const MAX_LABEL_CHARS: usize = 100;

/// Options of the list command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFilter {
    /// Only unicycles owned by this member.
    pub owner: Option<UserId>,
    /// Only club-owned unicycles.
    pub collective_only: bool,
    /// Only unicycles held by this member.
    pub custodian: Option<UserId>,
    /// Substring of the name or description.
    pub search_text: Option<String>,
    /// Ignore every other filter. Admins only.
    pub show_all: bool,
}

impl ListFilter {
    /// Translate into a store query plus the labels shown to the caller.
    ///
    /// `show_all` only takes effect when `is_admin` is set.
    pub fn to_query(&self, guild_id: GuildId, is_admin: bool) -> AppResult<(UnicycleQuery, Vec<String>)> {
        if self.show_all && is_admin {
            return Ok((UnicycleQuery::all(guild_id), vec!["showing all".to_string()]));
        }
        if self.owner.is_some() && self.collective_only {
            return Err(AppError::validation(
                "Choose either an owner or club-owned, not both.",
            ));
        }

        let mut query = UnicycleQuery::all(guild_id);
        let mut applied = Vec::new();

        if let Some(owner) = self.owner {
            query.owner = Some(Ownership::Member(owner));
            applied.push(format!("owned by {}", owner.mention()));
        } else if self.collective_only {
            query.owner = Some(Ownership::Collective);
            applied.push("club-owned".to_string());
        } else {
            query.exclude_collective = true;
        }

        if let Some(custodian) = self.custodian {
            query.custodian = Some(custodian);
            applied.push(format!("in custody of {}", custodian.mention()));
        }

        if let Some(text) = self.search_text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query.search_text = Some(text.to_string());
            applied.push(format!("matching \"{text}\""));
        }

        Ok((query, applied))
    }
}

/// Unicycles matching a list request.
#[derive(Debug, Clone)]
pub struct ListResult {
    /// Matches ordered by number.
    pub unicycles: Vec<Unicycle>,
    /// Human-readable description of each applied filter.
    pub applied: Vec<String>,
}

impl ListResult {
    /// `Unicycles (filter, filter)` heading.
    pub fn title(&self) -> String {
        if self.applied.is_empty() {
            "Unicycles".to_string()
        } else {
            format!("Unicycles ({})", self.applied.join(", "))
        }
    }

    /// The entries that fit in one response.
    pub fn shown(&self) -> &[Unicycle] {
        &self.unicycles[..self.unicycles.len().min(MAX_CHOICES)]
    }

    /// How many entries did not fit.
    pub fn hidden(&self) -> usize {
        self.unicycles.len().saturating_sub(MAX_CHOICES)
    }
}

/// One autocomplete choice for a unicycle argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Guild-scoped number, the value submitted with the command.
    pub number: i64,
    /// `#n: name`, the text the caller sees.
    pub label: String,
}

/// Choices whose label contains `partial` or whose number starts with it.
pub fn suggest(unicycles: &[Unicycle], partial: &str) -> Vec<Suggestion> {
    let needle = partial.trim().trim_start_matches('#').to_lowercase();
    unicycles
        .iter()
        .filter(|u| {
            u.label().to_lowercase().contains(&needle)
                || u.guild_specific_id.to_string().starts_with(&needle)
        })
        .take(MAX_CHOICES)
        .map(|u| Suggestion {
            number: u.guild_specific_id,
            label: clip_label(u.label()),
        })
        .collect()
}

fn clip_label(label: String) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label;
    }
    let mut clipped: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    clipped.push('…');
    clipped
}
