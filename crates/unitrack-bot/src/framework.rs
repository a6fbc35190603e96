//! Framework hooks: command logging and the error boundary.

use poise::CreateReply;
use tracing::{error, info, warn};

use crate::Context;
use crate::error::BotError;
use crate::state::Data;

/// Logs every command invocation.
pub async fn pre_command(ctx: Context<'_>) {
    info!(
        command = %ctx.command().qualified_name,
        user_id = %ctx.author().id,
        guild_id = ?ctx.guild_id().map(|g| g.get()),
        "Command invoked"
    );
}

/// Logs every completed command.
pub async fn post_command(ctx: Context<'_>) {
    info!(
        command = %ctx.command().qualified_name,
        user_id = %ctx.author().id,
        "Command completed"
    );
}

/// Turns every failure into a private reply to the caller.
pub async fn on_error(error: poise::FrameworkError<'_, Data, BotError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(error = %error, "Bot setup failed");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command = ctx.command().qualified_name.clone();
            if error.is_user_facing() {
                warn!(command = %command, user_id = %ctx.author().id, error = %error, "Command rejected");
            } else {
                error!(command = %command, user_id = %ctx.author().id, error = ?error, "Command failed");
            }
            let reply = CreateReply::default()
                .content(error.user_message())
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!(error = %e, "Failed to send error reply");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "Error while handling framework error");
            }
        }
    }
}
