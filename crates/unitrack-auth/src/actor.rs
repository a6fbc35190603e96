//! The acting member and the per-unicycle policies.

use serde::{Deserialize, Serialize};

use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::UserId;
use unitrack_entity::unicycle::Unicycle;

use crate::capability::CapabilitySet;

/// A member issuing a command, with capabilities resolved for one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user.
    pub user_id: UserId,
    /// Capabilities held in the guild the command runs in.
    pub capabilities: CapabilitySet,
}

impl Actor {
    /// Create an actor.
    pub fn new(user_id: UserId, capabilities: CapabilitySet) -> Self {
        Self {
            user_id,
            capabilities,
        }
    }

    /// An actor without any admin capability.
    pub fn member(user_id: UserId) -> Self {
        Self::new(user_id, CapabilitySet::empty())
    }

    /// Whether the actor is a unicycle admin in this guild.
    pub fn is_admin(&self) -> bool {
        self.capabilities.is_admin()
    }

    /// Custodian or admin.
    pub fn can_transfer(&self, unicycle: &Unicycle) -> bool {
        unicycle.is_in_custody_of(self.user_id) || self.is_admin()
    }

    /// Individual owner or admin.
    pub fn can_edit(&self, unicycle: &Unicycle) -> bool {
        unicycle.is_owned_by(self.user_id) || self.is_admin()
    }

    /// Individual owner or admin.
    pub fn can_remove(&self, unicycle: &Unicycle) -> bool {
        self.can_edit(unicycle)
    }

    /// Transfer recipient or admin.
    pub fn can_resolve(&self, recipient: UserId) -> bool {
        recipient == self.user_id || self.is_admin()
    }

    /// Fail with an authorization error unless the actor is an admin.
    pub fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only admins can {action}."
            )))
        }
    }

    /// Fail unless the actor may change the admin-role list.
    pub fn require_role_manager(&self) -> AppResult<()> {
        if self.capabilities.can_manage_admin_roles() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "Only the server owner or an administrator can manage admin roles.",
            ))
        }
    }
}
