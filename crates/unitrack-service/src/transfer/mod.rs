//! Custody transfers: the pending store, the accept/decline workflow, and
//! the background expiry sweep.

pub mod store;
pub mod sweeper;
pub mod workflow;

pub use store::{PendingTransfer, PendingTransferStore, TransferKey};
pub use sweeper::TransferSweeper;
pub use workflow::{Decision, TransferOutcome, TransferWorkflow};
