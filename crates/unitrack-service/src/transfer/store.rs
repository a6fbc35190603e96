//! In-memory store of pending transfers.
//!
//! Pending transfers are never persisted. Each one lives until it is
//! resolved, superseded by a newer request for the same unicycle, or its
//! confirmation window closes. An expired entry is indistinguishable from
//! one that never existed.

use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::Instant;
use tracing::debug;

use unitrack_core::types::{GuildId, TransferId, UserId};

/// Identity of a unicycle across guilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferKey {
    /// Guild the unicycle belongs to.
    pub guild_id: GuildId,
    /// Guild-scoped unicycle number.
    pub number: i64,
}

impl TransferKey {
    /// Creates a new key.
    pub fn new(guild_id: GuildId, number: i64) -> Self {
        Self { guild_id, number }
    }
}

/// A transfer waiting for the recipient's answer.
#[derive(Debug, Clone)]
pub struct PendingTransfer {
    /// Identifies this request among requests for the same unicycle.
    pub id: TransferId,
    /// The unicycle being handed over.
    pub key: TransferKey,
    /// Unicycle name at request time, for messages.
    pub unicycle_name: String,
    /// Member who requested the transfer.
    pub from: UserId,
    /// Member invited to take custody.
    pub to: UserId,
    /// When the request was made.
    pub requested_at: Instant,
    /// When the confirmation window closes.
    pub expires_at: Instant,
}

impl PendingTransfer {
    /// Create a request that stays open for `ttl`.
    pub fn new(
        key: TransferKey,
        unicycle_name: impl Into<String>,
        from: UserId,
        to: UserId,
        ttl: Duration,
    ) -> Self {
        let requested_at = Instant::now();
        Self {
            id: TransferId::new(),
            key,
            unicycle_name: unicycle_name.into(),
            from,
            to,
            requested_at,
            expires_at: requested_at + ttl,
        }
    }

    /// Whether the window has closed at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Concurrent map of pending transfers keyed by `(guild, number)`.
#[derive(Debug)]
pub struct PendingTransferStore {
    entries: DashMap<TransferKey, PendingTransfer>,
    ttl: Duration,
}

impl PendingTransferStore {
    /// Creates an empty store whose requests stay open for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Confirmation window length.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a transfer, replacing any earlier request for the same unicycle.
    ///
    /// Returns the replaced request if it was still live.
    pub fn insert(&self, transfer: PendingTransfer) -> Option<PendingTransfer> {
        let now = Instant::now();
        let key = transfer.key;
        let replaced = self
            .entries
            .insert(key, transfer)
            .filter(|old| !old.is_expired_at(now));
        if let Some(old) = &replaced {
            debug!(
                guild_id = %key.guild_id,
                unicycle = key.number,
                transfer_id = %old.id,
                "Pending transfer superseded"
            );
        }
        replaced
    }

    /// Put a claimed transfer back unless a newer one took its place.
    pub fn restore(&self, transfer: PendingTransfer) -> bool {
        match self.entries.entry(transfer.key) {
            Entry::Vacant(slot) => {
                slot.insert(transfer);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// The live transfer for a unicycle, if any.
    ///
    /// An expired entry found here is dropped.
    pub fn get_live(&self, key: TransferKey) -> Option<PendingTransfer> {
        let entry = self.entries.get(&key).map(|e| e.value().clone())?;
        if entry.is_expired_at(Instant::now()) {
            self.entries.remove_if(&key, |_, v| v.id == entry.id);
            return None;
        }
        Some(entry)
    }

    /// Remove and return the transfer only if it is still the live request `id`.
    ///
    /// Exactly one caller can claim a given request.
    pub fn take_if(&self, key: TransferKey, id: TransferId) -> Option<PendingTransfer> {
        let now = Instant::now();
        self.entries
            .remove_if(&key, |_, v| v.id == id && !v.is_expired_at(now))
            .map(|(_, v)| v)
    }

    /// Drop request `id` whatever its state. Returns whether it was present.
    pub fn abandon(&self, key: TransferKey, id: TransferId) -> bool {
        self.entries.remove_if(&key, |_, v| v.id == id).is_some()
    }

    /// Drop any request for a unicycle.
    pub fn discard(&self, key: TransferKey) -> Option<PendingTransfer> {
        self.entries.remove(&key).map(|(_, v)| v)
    }

    /// Remove every expired request. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, v| {
            let keep = !v.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Remove everything.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored requests, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
