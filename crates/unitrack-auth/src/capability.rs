//! Capabilities an actor can hold within one guild.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A source of administrative authority in a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The actor is the guild's designated owner.
    GuildOwner,
    /// The actor holds the platform-native administrator permission.
    PlatformAdministrator,
    /// The actor holds one of the guild's configured admin roles.
    AdminRole,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GuildOwner => write!(f, "guild_owner"),
            Self::PlatformAdministrator => write!(f, "platform_administrator"),
            Self::AdminRole => write!(f, "admin_role"),
        }
    }
}

/// The capabilities resolved for one actor in one guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// A set with no capabilities.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a capability.
    pub fn grant(&mut self, capability: Capability) {
        self.0.insert(capability);
    }

    /// Builder-style [`CapabilitySet::grant`].
    pub fn with(mut self, capability: Capability) -> Self {
        self.grant(capability);
        self
    }

    /// Whether the set holds `capability`.
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Any capability makes the actor a unicycle admin.
    pub fn is_admin(&self) -> bool {
        !self.0.is_empty()
    }

    /// Only guild owners and platform administrators manage the admin-role list.
    pub fn can_manage_admin_roles(&self) -> bool {
        self.contains(Capability::GuildOwner) || self.contains(Capability::PlatformAdministrator)
    }

    /// Iterate over the held capabilities.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", names.join(","))
    }
}
