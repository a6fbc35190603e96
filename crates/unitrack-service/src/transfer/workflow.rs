//! The custody-transfer workflow.
//!
//! `NONE -> PENDING -> {COMMITTED | DECLINED | EXPIRED}`. Only an accepted
//! transfer touches the durable store.

use std::sync::Arc;

use tracing::{info, warn};

use unitrack_core::error::AppError;
use unitrack_core::result::AppResult;
use unitrack_core::types::{TransferId, UserId};
use unitrack_database::repositories::UnicycleRepository;
use unitrack_entity::unicycle::Unicycle;

use super::store::{PendingTransfer, PendingTransferStore, TransferKey};
use crate::context::RequestContext;

/// The recipient's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Take custody.
    Accept,
    /// Refuse custody.
    Decline,
}

/// Result of resolving a pending transfer.
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    /// Custody moved to the recipient.
    Committed {
        /// The resolved request.
        transfer: PendingTransfer,
        /// The unicycle after the custody change.
        unicycle: Unicycle,
    },
    /// The request was dropped and custody is unchanged.
    Declined {
        /// The resolved request.
        transfer: PendingTransfer,
    },
}

impl TransferOutcome {
    /// The resolved request.
    pub fn transfer(&self) -> &PendingTransfer {
        match self {
            Self::Committed { transfer, .. } | Self::Declined { transfer } => transfer,
        }
    }
}

/// Requests and resolves custody transfers.
#[derive(Debug, Clone)]
pub struct TransferWorkflow {
    /// Unicycle repository.
    unicycles: Arc<UnicycleRepository>,
    /// Pending requests.
    store: Arc<PendingTransferStore>,
}

impl TransferWorkflow {
    /// Creates a new transfer workflow.
    pub fn new(unicycles: Arc<UnicycleRepository>, store: Arc<PendingTransferStore>) -> Self {
        Self { unicycles, store }
    }

    /// The pending-transfer store.
    pub fn store(&self) -> &Arc<PendingTransferStore> {
        &self.store
    }

    /// Ask `to` to take custody of unicycle `number`.
    ///
    /// Only the custodian or an admin may ask. A newer request replaces any
    /// earlier one for the same unicycle.
    pub async fn request(
        &self,
        ctx: &RequestContext,
        number: i64,
        to: UserId,
    ) -> AppResult<PendingTransfer> {
        let unicycle = self
            .unicycles
            .find_by_number(ctx.guild_id, number)
            .await?
            .ok_or_else(|| not_found(number))?;

        if !ctx.actor.can_transfer(&unicycle) {
            return Err(AppError::authorization(
                "You can only transfer unicycles in your custody.",
            ));
        }
        if unicycle.is_in_custody_of(to) {
            return Err(AppError::validation(format!(
                "{} already has custody of {}.",
                to.mention(),
                unicycle.label()
            )));
        }

        let transfer = PendingTransfer::new(
            TransferKey::new(ctx.guild_id, number),
            unicycle.name.clone(),
            ctx.user_id(),
            to,
            self.store.ttl(),
        );
        self.store.insert(transfer.clone());

        info!(
            guild_id = %ctx.guild_id,
            user_id = %ctx.user_id(),
            unicycle = number,
            transfer_id = %transfer.id,
            to = %to,
            "Transfer requested"
        );

        Ok(transfer)
    }

    /// Accept or decline the pending transfer of unicycle `number`.
    ///
    /// With `expected` set, only that specific request can be resolved.
    /// A missing, expired, or superseded request reports absence and
    /// changes nothing.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        number: i64,
        decision: Decision,
        expected: Option<TransferId>,
    ) -> AppResult<TransferOutcome> {
        let key = TransferKey::new(ctx.guild_id, number);
        let pending = self
            .store
            .get_live(key)
            .filter(|p| expected.is_none_or(|id| id == p.id))
            .ok_or_else(|| no_pending(number))?;

        if !ctx.actor.can_resolve(pending.to) {
            return Err(AppError::authorization(format!(
                "Only {} can respond to this transfer.",
                pending.to.mention()
            )));
        }

        let transfer = self
            .store
            .take_if(key, pending.id)
            .ok_or_else(|| no_pending(number))?;

        match decision {
            Decision::Decline => {
                info!(
                    guild_id = %ctx.guild_id,
                    user_id = %ctx.user_id(),
                    unicycle = number,
                    transfer_id = %transfer.id,
                    "Transfer declined"
                );
                Ok(TransferOutcome::Declined { transfer })
            }
            Decision::Accept => {
                let updated = match self
                    .unicycles
                    .set_custodian(ctx.guild_id, number, transfer.to)
                    .await
                {
                    Ok(updated) => updated,
                    Err(e) => {
                        warn!(
                            transfer_id = %transfer.id,
                            error = %e,
                            "Custody update failed, keeping transfer pending"
                        );
                        self.store.restore(transfer);
                        return Err(e);
                    }
                };
                let unicycle = updated.ok_or_else(|| {
                    AppError::not_found(format!("Unicycle #{number} no longer exists."))
                })?;

                info!(
                    guild_id = %ctx.guild_id,
                    user_id = %ctx.user_id(),
                    unicycle = number,
                    transfer_id = %transfer.id,
                    custodian = %unicycle.custodian,
                    "Transfer committed"
                );
                Ok(TransferOutcome::Committed { transfer, unicycle })
            }
        }
    }

    /// Drop request `id` once its confirmation prompt has closed.
    pub fn expire(&self, key: TransferKey, id: TransferId) -> bool {
        let removed = self.store.abandon(key, id);
        if removed {
            info!(
                guild_id = %key.guild_id,
                unicycle = key.number,
                transfer_id = %id,
                "Transfer expired"
            );
        }
        removed
    }
}

fn not_found(number: i64) -> AppError {
    AppError::not_found(format!("Unicycle #{number} not found in this server!"))
}

fn no_pending(number: i64) -> AppError {
    AppError::not_found(format!("There is no pending transfer for unicycle #{number}."))
}
