//! Unicycle lifecycle commands.

use poise::CreateReply;
use poise::serenity_prelude as serenity;

use unitrack_service::{ListFilter, UnicycleEdit};

use super::autocomplete_unicycle;
use crate::Context;
use crate::error::BotError;
use crate::render;
use crate::utils::{parse_unicycle_ref, request_context, user_id};

/// Add a new unicycle. You become its owner and custodian.
#[poise::command(slash_command, rename = "add-unicycle")]
pub async fn add_unicycle(
    ctx: Context<'_>,
    #[description = "Name of the unicycle"] name: String,
    #[description = "Description of the unicycle"] description: String,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let unicycle = ctx.data().unicycles.create(&rc, &name, Some(description)).await?;

    ctx.say(format!(
        "Added unicycle **{}**. Owner and custody: {}.",
        unicycle.label(),
        rc.user_id().mention()
    ))
    .await?;
    Ok(())
}

/// Edit a unicycle's name, description, or owner.
#[poise::command(slash_command, rename = "edit-unicycle")]
pub async fn edit_unicycle(
    ctx: Context<'_>,
    #[description = "Unicycle to edit"]
    #[autocomplete = "autocomplete_unicycle"]
    unicycle: String,
    #[description = "New name"] name: Option<String>,
    #[description = "New description"] description: Option<String>,
    #[description = "New owner"] owner: Option<serenity::User>,
    #[description = "Make the unicycle club-owned (admins only)"] club_owned: Option<bool>,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let number = parse_unicycle_ref(&unicycle)?;
    let edit = UnicycleEdit {
        name,
        description,
        owner: owner.map(|u| user_id(u.id)),
        collective: club_owned.unwrap_or(false),
    };

    let outcome = ctx.data().unicycles.edit(&rc, number, edit).await?;
    if outcome.changes.is_empty() {
        ctx.send(
            CreateReply::default()
                .content(format!("Nothing changed for **{}**.", outcome.unicycle.label()))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let lines: Vec<String> = outcome.changes.iter().map(|c| format!("• {c}")).collect();
    ctx.say(format!(
        "Updated **{}**:\n{}",
        outcome.unicycle.label(),
        lines.join("\n")
    ))
    .await?;
    Ok(())
}

/// Permanently remove a unicycle.
#[poise::command(slash_command, rename = "remove-unicycle")]
pub async fn remove_unicycle(
    ctx: Context<'_>,
    #[description = "Unicycle to remove"]
    #[autocomplete = "autocomplete_unicycle"]
    unicycle: String,
    #[description = "Type 'confirm' to remove the unicycle"] confirm: String,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let number = parse_unicycle_ref(&unicycle)?;
    let removed = ctx.data().unicycles.remove(&rc, number, &confirm).await?;

    ctx.say(format!("Removed unicycle **{}**.", removed.label())).await?;
    Ok(())
}

/// Show one unicycle.
#[poise::command(slash_command, rename = "view-unicycle")]
pub async fn view_unicycle(
    ctx: Context<'_>,
    #[description = "Unicycle to view"]
    #[autocomplete = "autocomplete_unicycle"]
    unicycle: String,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let number = parse_unicycle_ref(&unicycle)?;
    let unicycle = ctx.data().unicycles.get(&rc, number).await?;

    ctx.send(CreateReply::default().embed(render::unicycle_embed(&unicycle)))
        .await?;
    Ok(())
}

/// List unicycles, optionally filtered.
#[poise::command(slash_command, rename = "list-unicycles")]
pub async fn list_unicycles(
    ctx: Context<'_>,
    #[description = "Only unicycles owned by this member"] owner: Option<serenity::User>,
    #[description = "Only club-owned unicycles"] club_owned: Option<bool>,
    #[description = "Only unicycles held by this member"] in_custody_of: Option<serenity::User>,
    #[description = "Text to look for in names and descriptions"] search_text: Option<String>,
    #[description = "Ignore all filters (admins only)"] show_all: Option<bool>,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let filter = ListFilter {
        owner: owner.map(|u| user_id(u.id)),
        collective_only: club_owned.unwrap_or(false),
        custodian: in_custody_of.map(|u| user_id(u.id)),
        search_text,
        show_all: show_all.unwrap_or(false),
    };

    let result = ctx.data().unicycles.list(&rc, &filter).await?;
    if result.unicycles.is_empty() {
        ctx.send(
            CreateReply::default()
                .content("No unicycles found matching your filters!")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    ctx.send(CreateReply::default().embed(render::list_embed(&result)))
        .await?;
    Ok(())
}
