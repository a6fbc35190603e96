//! Request context carrying the guild and the resolved actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unitrack_auth::{Actor, AuthorizationChecker};
use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::{GuildId, UserId};

/// Context for the current command invocation.
///
/// Built once per command so that every service call knows *where* it
/// runs and *who* is acting, with capabilities already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Guild the command was issued in.
    pub guild_id: GuildId,
    /// The acting member.
    pub actor: Actor,
    /// When the command was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(guild_id: GuildId, actor: Actor) -> Self {
        Self {
            guild_id,
            actor,
            request_time: Utc::now(),
        }
    }

    /// Resolve the actor's capabilities and build a context.
    ///
    /// Commands issued outside of a guild are rejected.
    pub async fn establish(
        checker: &AuthorizationChecker,
        guild_id: Option<GuildId>,
        user_id: UserId,
    ) -> AppResult<Self> {
        let guild_id = require_guild(guild_id)?;
        let actor = checker.actor(guild_id, user_id).await?;
        Ok(Self::new(guild_id, actor))
    }

    /// The acting user.
    pub fn user_id(&self) -> UserId {
        self.actor.user_id
    }

    /// Returns whether the acting user is an admin in this guild.
    pub fn is_admin(&self) -> bool {
        self.actor.is_admin()
    }
}

/// Fail with a context error when no guild is available.
pub fn require_guild(guild_id: Option<GuildId>) -> AppResult<GuildId> {
    guild_id.ok_or_else(|| AppError::context("This command can only be used in a server!"))
}
