//! Custody transfer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the accept/decline confirmation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// How long a transfer request accepts a decision.
    #[serde(default = "default_confirmation_timeout")]
    pub confirmation_timeout_seconds: u64,
    /// Interval between sweeps of expired pending transfers.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl TransferConfig {
    /// Lifetime of a pending transfer.
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_seconds)
    }

    /// Interval between expiry sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_seconds: default_confirmation_timeout(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_confirmation_timeout() -> u64 {
    300
}

fn default_sweep_interval() -> u64 {
    60
}
