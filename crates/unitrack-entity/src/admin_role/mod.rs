//! Admin role entities.

pub mod model;

pub use model::AdminRole;
