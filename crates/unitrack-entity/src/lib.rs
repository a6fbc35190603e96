//! # unitrack-entity
//!
//! Domain entity models for Unitrack. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod admin_role;
pub mod sequence;
pub mod unicycle;

pub use admin_role::AdminRole;
pub use sequence::GuildSequence;
pub use unicycle::{
    CreateUnicycle, CustodyMove, Ownership, OwnershipChange, Unicycle, UpdateUnicycle,
};
