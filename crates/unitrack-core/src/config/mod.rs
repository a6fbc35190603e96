//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod discord;
pub mod logging;
pub mod transfer;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::discord::DiscordConfig;
pub use self::logging::LoggingConfig;
pub use self::transfer::TransferConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat platform connection settings.
    #[serde(default)]
    pub discord: DiscordConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Custody transfer confirmation settings.
    #[serde(default)]
    pub transfer: TransferConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `{dir}/default.toml` with an environment-specific overlay and
    /// environment variables prefixed with `UNITRACK__`.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("UNITRACK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut app: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        if app.discord.token.trim().is_empty() {
            if let Ok(token) = std::env::var("DISCORD_TOKEN") {
                app.discord.token = token;
            }
        }

        Ok(app)
    }

    /// Check the settings needed to connect to the chat platform.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.discord.token.trim().is_empty() {
            return Err(AppError::configuration(
                "No bot token configured: set discord.token, UNITRACK__DISCORD__TOKEN, or DISCORD_TOKEN",
            ));
        }
        if self.transfer.confirmation_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "transfer.confirmation_timeout_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}
