//! Repository implementations for all Unitrack entities.

pub mod admin_role;
pub mod sequence;
pub mod unicycle;

pub use admin_role::AdminRoleRepository;
pub use sequence::GuildSequenceRepository;
pub use unicycle::{UnicycleQuery, UnicycleRepository};
