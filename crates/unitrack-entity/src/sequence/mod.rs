//! Per-guild sequence counter entities.

pub mod model;

pub use model::GuildSequence;
