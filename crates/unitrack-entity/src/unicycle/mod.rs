//! Unicycle entities.

pub mod model;
pub mod ownership;

pub use model::{CreateUnicycle, CustodyMove, OwnershipChange, Unicycle, UpdateUnicycle};
pub use ownership::Ownership;
