//! # Domain Entities
//!
//! The round and its entries.

use super::config::RaffleConfig;
use super::errors::{Address, Amount, EntryIndex, Hash, RaffleError, Salt, Timestamp};
use super::value_objects::{Deadlines, Phase, SettlementRecord};
use serde::{Deserialize, Serialize};

/// One paid ticket: a commitment, later optionally revealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable position in the round.
    pub index: EntryIndex,
    /// Owner of the ticket.
    pub participant: Address,
    /// Keccak-256 of participant address and salt.
    pub commitment: Hash,
    /// Salt, set once by a successful reveal.
    pub revealed_salt: Option<Salt>,
}

impl Entry {
    /// Create an unrevealed entry.
    pub fn new(index: EntryIndex, participant: Address, commitment: Hash) -> Self {
        Self {
            index,
            participant,
            commitment,
            revealed_salt: None,
        }
    }

    /// Check if revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed_salt.is_some()
    }

    /// Record the salt. An entry is revealed at most once.
    pub fn reveal(&mut self, salt: Salt) -> Result<(), RaffleError> {
        if self.is_revealed() {
            return Err(RaffleError::InvalidReveal);
        }
        self.revealed_salt = Some(salt);
        Ok(())
    }
}

/// The live round.
///
/// Entries form an append-only arena; they are only ever pushed or
/// cleared together on reset. Serialize-only: a round can be exported
/// but is only built through [`Round::open`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Round {
    cycle: u64,
    ticket_price: Amount,
    deadlines: Deadlines,
    entries: Vec<Entry>,
    rollover: Amount,
    last_settlement: Option<SettlementRecord>,
}

impl Round {
    /// Open the first cycle at `now`.
    pub fn open(config: &RaffleConfig, now: Timestamp) -> Result<Self, RaffleError> {
        config.validate()?;
        let deadlines =
            Deadlines::opening(now, config.commit_window_secs, config.reveal_window_secs)?;
        Ok(Self {
            cycle: 0,
            ticket_price: config.ticket_price,
            deadlines,
            entries: Vec::new(),
            rollover: 0,
            last_settlement: None,
        })
    }

    /// Number of completed settlements before this cycle.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Ticket price of this round.
    pub fn ticket_price(&self) -> Amount {
        self.ticket_price
    }

    /// Current deadline pair.
    pub fn deadlines(&self) -> Deadlines {
        self.deadlines
    }

    /// Derive the phase at `now`.
    pub fn phase(&self, now: Timestamp) -> Phase {
        Phase::at(now, &self.deadlines)
    }

    /// Fail unless the round is in `expected` at `now`.
    pub fn require_phase(&self, expected: Phase, now: Timestamp) -> Result<(), RaffleError> {
        self.phase(now).require(expected)
    }

    /// All entries in index order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries owned by `participant`.
    pub fn entries_of<'a>(&'a self, participant: &'a Address) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.participant == *participant)
    }

    /// Revealed entries in index order.
    pub fn revealed_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|entry| entry.is_revealed())
    }

    /// Number of revealed entries.
    pub fn revealed_count(&self) -> usize {
        self.revealed_entries().count()
    }

    /// Pool carried over from voided cycles.
    pub fn rollover(&self) -> Amount {
        self.rollover
    }

    /// Stakes of this cycle plus rollover.
    ///
    /// Entry admission checks this sum for overflow, so it always fits.
    pub fn pool_balance(&self) -> Amount {
        self.entries.len() as Amount * self.ticket_price + self.rollover
    }

    /// Most recent settlement, if any.
    pub fn last_settlement(&self) -> Option<&SettlementRecord> {
        self.last_settlement.as_ref()
    }

    pub(crate) fn push_entry(&mut self, participant: Address, commitment: Hash) -> EntryIndex {
        let index = self.entries.len();
        self.entries.push(Entry::new(index, participant, commitment));
        index
    }

    pub(crate) fn entry_mut(&mut self, index: EntryIndex) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    /// Replace this cycle with a fresh one.
    pub(crate) fn reset(
        &mut self,
        deadlines: Deadlines,
        rollover: Amount,
        record: SettlementRecord,
    ) {
        self.cycle += 1;
        self.deadlines = deadlines;
        self.entries.clear();
        self.rollover = rollover;
        self.last_settlement = Some(record);
    }
}
