//! # unitrack-auth
//!
//! Authorization for Unitrack.
//!
//! ## Modules
//!
//! - `directory`: the seam to the chat platform's guild/member data
//! - `capability`: the capabilities an actor can hold in a guild
//! - `actor`: an actor plus its capability set, and the per-unicycle policies
//! - `checker`: resolves an actor's capabilities once per request

pub mod actor;
pub mod capability;
pub mod checker;
pub mod directory;

pub use actor::Actor;
pub use capability::{Capability, CapabilitySet};
pub use checker::AuthorizationChecker;
pub use directory::{GuildDirectory, MemberProfile, StaticGuildDirectory};
