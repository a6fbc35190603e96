//! Background removal of expired pending transfers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use super::store::PendingTransferStore;

/// Periodically drops expired requests from a [`PendingTransferStore`].
#[derive(Debug, Clone)]
pub struct TransferSweeper {
    /// Store to sweep.
    store: Arc<PendingTransferStore>,
    /// Time between sweeps.
    interval: Duration,
}

impl TransferSweeper {
    /// Creates a new sweeper.
    pub fn new(store: Arc<PendingTransferStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run one sweep. Returns how many requests were removed.
    pub fn sweep(&self) -> usize {
        let removed = self.store.sweep_expired();
        if removed > 0 {
            debug!(removed, "Expired pending transfers removed");
        }
        removed
    }

    /// Sweep until `shutdown` flips to `true`, then clear the store.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "Transfer sweeper started");
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        let dropped = self.store.len();
        self.store.clear();
        info!(dropped, "Transfer sweeper stopped");
    }
}
