//! Admin role management commands.

use poise::CreateReply;
use poise::serenity_prelude as serenity;

use crate::Context;
use crate::error::BotError;
use crate::render;
use crate::utils::{request_context, role_id};

/// Manage the roles that grant unicycle admin rights.
#[poise::command(
    slash_command,
    subcommands("add_role", "remove_role", "list_roles"),
    subcommand_required
)]
pub async fn admin(_ctx: Context<'_>) -> Result<(), BotError> {
    Ok(())
}

/// Grant unicycle admin rights to a role.
#[poise::command(slash_command, rename = "add-role")]
pub async fn add_role(
    ctx: Context<'_>,
    #[description = "Role to add"] role: serenity::Role,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let added = ctx.data().admin_roles.add(&rc, role_id(role.id)).await?;

    ctx.send(
        CreateReply::default()
            .content(format!("Added {} as an admin role.", added.role_id.mention()))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Revoke unicycle admin rights from a role.
#[poise::command(slash_command, rename = "remove-role")]
pub async fn remove_role(
    ctx: Context<'_>,
    #[description = "Role to remove"] role: serenity::Role,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let role = role_id(role.id);
    ctx.data().admin_roles.remove(&rc, role).await?;

    ctx.send(
        CreateReply::default()
            .content(format!("Removed {} from the admin roles.", role.mention()))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Show the configured admin roles.
#[poise::command(slash_command, rename = "list-roles")]
pub async fn list_roles(ctx: Context<'_>) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let roles = ctx.data().admin_roles.list(&rc).await?;

    ctx.send(
        CreateReply::default()
            .content(render::admin_roles_message(&roles))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
