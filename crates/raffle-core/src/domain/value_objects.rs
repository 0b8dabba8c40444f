//! # Domain Value Objects
//!
//! Immutable value types for the raffle round: phase, deadlines and
//! settlement outcomes.

use super::errors::{Address, Amount, EntryIndex, RaffleError, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round phase, derived from the clock and the deadline pair.
///
/// Never stored: see [`Phase::at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Entries accepted (`now <= commit deadline`).
    Commit,
    /// Salts may be revealed (`commit < now <= reveal deadline`).
    Reveal,
    /// Round may be settled (`now > reveal deadline`).
    Settleable,
}

impl Phase {
    /// Derive the phase at `now`.
    ///
    /// Both boundaries are inclusive on the earlier phase: `now ==
    /// commit` is still Commit, `now == reveal` is still Reveal.
    pub fn at(now: Timestamp, deadlines: &Deadlines) -> Self {
        if now <= deadlines.commit {
            Self::Commit
        } else if now <= deadlines.reveal {
            Self::Reveal
        } else {
            Self::Settleable
        }
    }

    /// Fail with `PhaseError` unless `self == expected`.
    pub fn require(self, expected: Phase) -> Result<(), RaffleError> {
        if self != expected {
            return Err(RaffleError::PhaseError {
                expected,
                actual: self,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Commit => "Commit",
            Self::Reveal => "Reveal",
            Self::Settleable => "Settleable",
        };
        f.write_str(name)
    }
}

/// Absolute deadline pair of one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadlines {
    /// Last second at which entries are accepted.
    pub commit: Timestamp,
    /// Last second at which reveals are accepted.
    pub reveal: Timestamp,
}

impl Deadlines {
    /// Open a cycle starting at `start`.
    pub fn opening(
        start: Timestamp,
        commit_window_secs: u64,
        reveal_window_secs: u64,
    ) -> Result<Self, RaffleError> {
        let commit = start
            .checked_add(commit_window_secs)
            .ok_or(RaffleError::ArithmeticOverflow)?;
        let reveal = commit
            .checked_add(reveal_window_secs)
            .ok_or(RaffleError::ArithmeticOverflow)?;
        Ok(Self { commit, reveal })
    }

    /// Deadlines of the cycle that follows this one, opened at `now`.
    ///
    /// The new cycle never starts before this one ends, so both deadlines
    /// are strictly later than the current pair.
    pub fn following(
        &self,
        now: Timestamp,
        commit_window_secs: u64,
        reveal_window_secs: u64,
    ) -> Result<Self, RaffleError> {
        Self::opening(now.max(self.reveal), commit_window_secs, reveal_window_secs)
    }
}

/// Result of a settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementOutcome {
    /// A revealed entry won the whole pool.
    Won {
        /// Winning participant
        winner: Address,
        /// Index of the winning entry in the settled cycle
        entry_index: EntryIndex,
        /// Amount transferred
        prize: Amount,
    },
    /// Nobody revealed; the pool rolls into the next cycle.
    Void {
        /// Amount carried into the next cycle
        rolled_over: Amount,
    },
}

impl SettlementOutcome {
    /// Winner, if any.
    pub fn winner(&self) -> Option<Address> {
        match self {
            Self::Won { winner, .. } => Some(*winner),
            Self::Void { .. } => None,
        }
    }

    /// Check if the round was voided.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void { .. })
    }
}

/// Record of the most recent settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Cycle that was settled.
    pub cycle: u64,
    /// What happened.
    pub outcome: SettlementOutcome,
    /// Clock reading at settlement.
    pub settled_at: Timestamp,
}
