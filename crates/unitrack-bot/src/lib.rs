//! # unitrack-bot
//!
//! Discord surface for Unitrack: slash commands, transfer confirmation
//! buttons, and the Discord-backed guild directory. Built on poise.

pub mod app;
pub mod commands;
pub mod directory;
pub mod error;
pub mod framework;
pub mod render;
pub mod state;
pub mod utils;

pub use app::{Bot, Services};
pub use error::BotError;
pub use state::Data;

/// Poise context alias used throughout the bot.
pub type Context<'a> = poise::Context<'a, Data, BotError>;
