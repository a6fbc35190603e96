//! Chat platform configuration.

use serde::{Deserialize, Serialize};

/// Bot connection settings.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token.
    #[serde(default)]
    pub token: String,
    /// Register commands in this guild only (fast iteration during development).
    #[serde(default)]
    pub dev_guild_id: Option<u64>,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[redacted]")
            .field("dev_guild_id", &self.dev_guild_id)
            .finish()
    }
}
