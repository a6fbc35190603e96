//! Conversions between Discord ids and domain ids, and argument parsing.

use poise::serenity_prelude as serenity;

use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, RoleId, TransferId, UserId};
use unitrack_service::{Decision, RequestContext};

use crate::Context;
use crate::error::BotError;

/// Domain id of a Discord guild.
pub fn guild_id(id: serenity::GuildId) -> GuildId {
    GuildId::new(id.get())
}

/// Domain id of a Discord user.
pub fn user_id(id: serenity::UserId) -> UserId {
    UserId::new(id.get())
}

/// Domain id of a Discord role.
pub fn role_id(id: serenity::RoleId) -> RoleId {
    RoleId::new(id.get())
}

/// Build the request context for the invoking member.
pub async fn request_context(ctx: Context<'_>) -> Result<RequestContext, BotError> {
    let rc = RequestContext::establish(
        &ctx.data().checker,
        ctx.guild_id().map(guild_id),
        user_id(ctx.author().id),
    )
    .await?;
    Ok(rc)
}

/// Parse a unicycle argument: `12`, `#12`, or an autocomplete label `#12: Name`.
pub fn parse_unicycle_ref(input: &str) -> AppResult<i64> {
    let trimmed = input.trim();
    let number = trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .split(':')
        .next()
        .unwrap_or_default()
        .trim();
    number
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::validation(format!("'{trimmed}' is not a unicycle number.")))
}

/// Custom id of a transfer button: `<prefix>:<transfer>:<action>`.
pub fn button_id(prefix: &str, transfer: TransferId, decision: Decision) -> String {
    let action = match decision {
        Decision::Accept => "accept",
        Decision::Decline => "decline",
    };
    format!("{prefix}:{transfer}:{action}")
}

/// Parse a custom id produced by [`button_id`] with the same prefix.
pub fn parse_button_id(prefix: &str, custom_id: &str) -> Option<(TransferId, Decision)> {
    let rest = custom_id.strip_prefix(prefix)?.strip_prefix(':')?;
    let (transfer, action) = rest.split_once(':')?;
    let decision = match action {
        "accept" => Decision::Accept,
        "decline" => Decision::Decline,
        _ => return None,
    };
    Some((transfer.parse().ok()?, decision))
}
