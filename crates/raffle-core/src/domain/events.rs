//! # Raffle Events
//!
//! Records of state changes, published after the operation that caused
//! them has fully committed.

use super::errors::{Address, Amount, EntryIndex, Timestamp};
use serde::{Deserialize, Serialize};

/// Raffle event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaffleEvent {
    /// A paid entry was admitted.
    EntryRecorded {
        /// Cycle of the round
        cycle: u64,
        /// Ticket owner
        participant: Address,
        /// Index of the new entry
        index: EntryIndex,
    },
    /// A commitment was opened.
    Revealed {
        /// Cycle of the round
        cycle: u64,
        /// Revealing participant
        participant: Address,
        /// Index of the revealed entry
        index: EntryIndex,
    },
    /// The pool was paid out.
    WinnerSelected {
        /// Settled cycle
        cycle: u64,
        /// Prize recipient
        winner: Address,
        /// Amount transferred
        prize: Amount,
        /// Clock reading at settlement
        settled_at: Timestamp,
    },
    /// Nobody revealed; the pool carries over.
    RoundVoided {
        /// Settled cycle
        cycle: u64,
        /// Amount carried into the next cycle
        rolled_over: Amount,
        /// Clock reading at settlement
        settled_at: Timestamp,
    },
}

impl RaffleEvent {
    /// Cycle the event belongs to.
    pub fn cycle(&self) -> u64 {
        match self {
            Self::EntryRecorded { cycle, .. }
            | Self::Revealed { cycle, .. }
            | Self::WinnerSelected { cycle, .. }
            | Self::RoundVoided { cycle, .. } => *cycle,
        }
    }

    /// Short event name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EntryRecorded { .. } => "entry_recorded",
            Self::Revealed { .. } => "revealed",
            Self::WinnerSelected { .. } => "winner_selected",
            Self::RoundVoided { .. } => "round_voided",
        }
    }
}
