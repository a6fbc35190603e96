//! The transfer command and its confirmation buttons.

use poise::CreateReply;
use poise::serenity_prelude as serenity;
use tokio::time::Instant;
use tracing::debug;

use unitrack_core::error::{AppError, ErrorKind};
use unitrack_service::{Decision, PendingTransfer, RequestContext};

use super::autocomplete_unicycle;
use crate::Context;
use crate::error::BotError;
use crate::render;
use crate::utils::{
    button_id, guild_id, parse_button_id, parse_unicycle_ref, request_context, user_id,
};

/// Ask another member to take custody of a unicycle.
#[poise::command(slash_command, rename = "transfer-unicycle")]
pub async fn transfer_unicycle(
    ctx: Context<'_>,
    #[description = "Unicycle to transfer"]
    #[autocomplete = "autocomplete_unicycle"]
    unicycle: String,
    #[description = "Member who should take custody"] to: serenity::User,
) -> Result<(), BotError> {
    let rc = request_context(ctx).await?;
    let number = parse_unicycle_ref(&unicycle)?;
    if to.bot {
        return Err(AppError::validation("Bots cannot take custody of unicycles.").into());
    }

    let pending = ctx.data().transfers.request(&rc, number, user_id(to.id)).await?;

    let prefix = ctx.id().to_string();
    let reply = ctx
        .send(
            CreateReply::default()
                .content(render::transfer_prompt(&pending))
                .components(render::transfer_buttons(
                    button_id(&prefix, pending.id, Decision::Accept),
                    button_id(&prefix, pending.id, Decision::Decline),
                )),
        )
        .await?;

    if !await_answer(ctx, &pending, &prefix).await? {
        ctx.data().transfers.expire(pending.key, pending.id);
        reply
            .edit(
                ctx,
                CreateReply::default()
                    .content(render::transfer_expired(&pending))
                    .components(vec![]),
            )
            .await?;
    }
    Ok(())
}

/// Handle button presses until the request is resolved or its window closes.
///
/// Returns `false` when the window closed without a resolution.
async fn await_answer(
    ctx: Context<'_>,
    pending: &PendingTransfer,
    prefix: &str,
) -> Result<bool, BotError> {
    loop {
        let remaining = pending.expires_at.saturating_duration_since(Instant::now());
        let own_prefix = format!("{prefix}:");
        let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
            .channel_id(ctx.channel_id())
            .filter(move |press| press.data.custom_id.starts_with(&own_prefix))
            .timeout(remaining)
            .await
        else {
            return Ok(false);
        };

        let Some((transfer_id, decision)) = parse_button_id(prefix, &press.data.custom_id) else {
            continue;
        };
        debug!(transfer_id = %transfer_id, user_id = %press.user.id, ?decision, "Transfer button pressed");

        let result = match RequestContext::establish(
            &ctx.data().checker,
            ctx.guild_id().map(guild_id),
            user_id(press.user.id),
        )
        .await
        {
            Ok(presser) => {
                ctx.data()
                    .transfers
                    .resolve(&presser, pending.key.number, decision, Some(transfer_id))
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => {
                close_prompt(ctx, &press, render::transfer_result(&outcome)).await?;
                return Ok(true);
            }
            Err(e) if e.kind == ErrorKind::NotFound => {
                close_prompt(ctx, &press, e.user_message()).await?;
                return Ok(true);
            }
            Err(e) => {
                press
                    .create_response(
                        ctx,
                        serenity::CreateInteractionResponse::Message(
                            serenity::CreateInteractionResponseMessage::new()
                                .content(e.user_message())
                                .ephemeral(true),
                        ),
                    )
                    .await?;
            }
        }
    }
}

/// Replace the prompt with `content` and drop its buttons.
async fn close_prompt(
    ctx: Context<'_>,
    press: &serenity::ComponentInteraction,
    content: String,
) -> Result<(), BotError> {
    press
        .create_response(
            ctx,
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .components(vec![]),
            ),
        )
        .await?;
    Ok(())
}
