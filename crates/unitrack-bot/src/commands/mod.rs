//! Slash commands.

pub mod admin;
pub mod transfer;
pub mod unicycle;

use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::Context;
use crate::error::BotError;
use crate::state::Data;
use crate::utils::guild_id;

/// Every top-level command the bot registers.
pub fn all() -> Vec<poise::Command<Data, BotError>> {
    vec![
        unicycle::add_unicycle(),
        unicycle::edit_unicycle(),
        unicycle::remove_unicycle(),
        unicycle::view_unicycle(),
        unicycle::list_unicycles(),
        transfer::transfer_unicycle(),
        admin::admin(),
    ]
}

/// Autocomplete for unicycle arguments: `#n: name` labels, number as value.
pub async fn autocomplete_unicycle<'a>(
    ctx: Context<'_>,
    partial: &'a str,
) -> Vec<serenity::AutocompleteChoice> {
    let Some(guild) = ctx.guild_id() else {
        return Vec::new();
    };
    match ctx.data().unicycles.suggest(guild_id(guild), partial).await {
        Ok(suggestions) => suggestions
            .into_iter()
            .map(|s| serenity::AutocompleteChoice::new(s.label, s.number.to_string()))
            .collect(),
        Err(e) => {
            warn!(guild_id = %guild, error = %e, "Autocomplete lookup failed");
            Vec::new()
        }
    }
}
