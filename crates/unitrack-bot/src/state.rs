//! Data shared across all commands.

use unitrack_auth::AuthorizationChecker;
use unitrack_service::{AdminRoleService, TransferWorkflow, UnicycleService};

/// Shared data accessible across all poise commands and hooks.
#[derive(Debug, Clone)]
pub struct Data {
    // ── Auth ─────────────────────────────────────────────────
    /// Resolves the acting member's capabilities.
    pub checker: AuthorizationChecker,

    // ── Services ─────────────────────────────────────────────
    /// Unicycle lifecycle.
    pub unicycles: UnicycleService,
    /// Admin role management.
    pub admin_roles: AdminRoleService,
    /// Custody transfers.
    pub transfers: TransferWorkflow,
}
