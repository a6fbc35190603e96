//! # unitrack-service
//!
//! Business logic service layer for Unitrack. Each service orchestrates
//! repositories, the pending-transfer store, and authorization to
//! implement one group of bot commands.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod admin_role;
pub mod context;
pub mod transfer;
pub mod unicycle;

pub use admin_role::AdminRoleService;
pub use context::RequestContext;
pub use transfer::{
    Decision, PendingTransfer, PendingTransferStore, TransferKey, TransferOutcome,
    TransferSweeper, TransferWorkflow,
};
pub use unicycle::{EditOutcome, ListFilter, ListResult, Suggestion, UnicycleEdit, UnicycleService};
