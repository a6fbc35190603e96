//! Errors raised by command handlers and their rendering.

use poise::serenity_prelude as serenity;
use thiserror::Error;

use unitrack_core::error::{AppError, ErrorKind};

/// Error type of every command.
#[derive(Debug, Error)]
pub enum BotError {
    /// A domain or store failure.
    #[error(transparent)]
    App(#[from] AppError),
    /// The Discord API rejected a call.
    #[error("Discord API error: {0}")]
    Discord(#[from] serenity::Error),
}

impl BotError {
    /// Private text shown to the caller.
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.user_message(),
            Self::Discord(_) => "Something went wrong talking to Discord. Please try again.".to_string(),
        }
    }

    /// Whether the failure is the caller's to fix.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::App(err) if err.is_user_facing())
    }
}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        match err {
            BotError::App(err) => err,
            BotError::Discord(err) => {
                AppError::with_source(ErrorKind::ExternalService, format!("Discord client error: {err}"), err)
            }
        }
    }
}
