//! # unitrack-database
//!
//! SQLite connection management, embedded migrations, and concrete
//! repository implementations for all Unitrack entities.

pub mod connection;
pub(crate) mod error;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
