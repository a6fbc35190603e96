//! Discord-backed [`GuildDirectory`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use unitrack_auth::{GuildDirectory, MemberProfile};
use unitrack_core::error::{AppError, ErrorKind};
use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, UserId};

use crate::utils::role_id;

/// Looks members up through the gateway cache, falling back to HTTP.
#[derive(Clone)]
pub struct DiscordDirectory {
    cache: Arc<serenity::Cache>,
    http: Arc<serenity::Http>,
}

impl std::fmt::Debug for DiscordDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordDirectory").finish()
    }
}

impl DiscordDirectory {
    /// Creates a directory from a connected client's cache and HTTP handle.
    pub fn new(cache: Arc<serenity::Cache>, http: Arc<serenity::Http>) -> Self {
        Self { cache, http }
    }

    async fn guild_roles(
        &self,
        guild: serenity::GuildId,
    ) -> AppResult<(serenity::UserId, HashMap<serenity::RoleId, serenity::Role>)> {
        let cached = self
            .cache
            .guild(guild)
            .map(|g| (g.owner_id, g.roles.clone()));
        if let Some(found) = cached {
            return Ok(found);
        }

        debug!(guild_id = %guild, "Guild not cached, fetching");
        let partial = guild
            .to_partial_guild(&self.http)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::ExternalService, "Failed to fetch guild", e))?;
        Ok((partial.owner_id, partial.roles))
    }
}

#[async_trait]
impl GuildDirectory for DiscordDirectory {
    async fn member_profile(
        &self,
        guild: GuildId,
        user: UserId,
    ) -> AppResult<Option<MemberProfile>> {
        let guild_id = serenity::GuildId::new(guild.get());
        let user_id = serenity::UserId::new(user.get());

        let (owner_id, roles) = self.guild_roles(guild_id).await?;

        let member = match guild_id
            .member((&self.cache, self.http.as_ref()), user_id)
            .await
        {
            Ok(member) => member,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => {
                warn!(guild_id = %guild, user_id = %user, error = %e, "Member lookup failed");
                return Err(AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to fetch guild member",
                    e,
                ));
            }
        };

        // @everyone shares the guild's id.
        let everyone = serenity::RoleId::new(guild_id.get());
        let is_administrator = std::iter::once(&everyone)
            .chain(member.roles.iter())
            .filter_map(|r| roles.get(r))
            .any(|role| role.permissions.administrator());

        Ok(Some(MemberProfile {
            is_guild_owner: owner_id == user_id,
            is_administrator,
            roles: member.roles.iter().copied().map(role_id).collect(),
        }))
    }
}

fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(resp))
            if resp.status_code.as_u16() == 404
    )
}
