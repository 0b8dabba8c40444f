//! Operation counters for the raffle service
//!
//! Thread-safe counters, read through [`RaffleMetrics::snapshot`].

use crate::domain::RaffleError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for raffle operations
#[derive(Debug, Default)]
pub struct RaffleMetrics {
    /// Entries admitted
    entries_recorded: AtomicU64,
    /// Reveals accepted
    reveals_accepted: AtomicU64,
    /// Operations rejected by validation
    operations_rejected: AtomicU64,
    /// Settlements that paid a winner
    rounds_won: AtomicU64,
    /// Settlements with no revealed entry
    rounds_voided: AtomicU64,
    /// Settlements rolled back by a failed transfer
    transfer_failures: AtomicU64,
}

impl RaffleMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an admitted entry
    pub fn record_entry(&self) {
        self.entries_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an accepted reveal
    pub fn record_reveal(&self) {
        self.reveals_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed settlement
    pub fn record_settlement(&self, void: bool) {
        if void {
            self.rounds_voided.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rounds_won.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed operation
    pub fn record_error(&self, error: &RaffleError) {
        match error {
            RaffleError::TransferFailure(_) => {
                self.transfer_failures.fetch_add(1, Ordering::Relaxed);
            }
            _ => {
                self.operations_rejected.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            entries_recorded: self.entries_recorded.load(Ordering::Relaxed),
            reveals_accepted: self.reveals_accepted.load(Ordering::Relaxed),
            operations_rejected: self.operations_rejected.load(Ordering::Relaxed),
            rounds_won: self.rounds_won.load(Ordering::Relaxed),
            rounds_voided: self.rounds_voided.load(Ordering::Relaxed),
            transfer_failures: self.transfer_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Entries admitted
    pub entries_recorded: u64,
    /// Reveals accepted
    pub reveals_accepted: u64,
    /// Operations rejected by validation
    pub operations_rejected: u64,
    /// Settlements that paid a winner
    pub rounds_won: u64,
    /// Settlements with no revealed entry
    pub rounds_voided: u64,
    /// Settlements rolled back by a failed transfer
    pub transfer_failures: u64,
}

impl MetricsSnapshot {
    /// Completed settlements
    pub fn settlements(&self) -> u64 {
        self.rounds_won + self.rounds_voided
    }
}
