//! # Inbound Ports
//!
//! API trait defining what the raffle can do.

use crate::domain::{Address, Amount, Entry, Hash, Phase, RaffleError, Salt, SettlementOutcome};

/// Raffle API - inbound port.
///
/// All methods take `&self`; implementations serialize mutations
/// internally so one instance can be shared across threads.
pub trait RaffleApi: Send + Sync {
    /// Buy one ticket bound to `commitment`, paying exactly the ticket price.
    fn enter(
        &self,
        participant: Address,
        commitment: Hash,
        payment: Amount,
    ) -> Result<usize, RaffleError>;

    /// Open one of `participant`'s commitments with `salt`.
    fn reveal(&self, participant: Address, salt: Salt) -> Result<usize, RaffleError>;

    /// Pay out (or void) the round and open the next cycle.
    fn settle(&self) -> Result<SettlementOutcome, RaffleError>;

    /// Phase at the current clock reading.
    fn current_phase(&self) -> Phase;

    /// Snapshot of the current cycle's entries.
    fn entries(&self) -> Vec<Entry>;

    /// Ticket price.
    fn ticket_price(&self) -> Amount;

    /// Commit window length in seconds.
    fn commit_window_length(&self) -> u64;

    /// Reveal window length in seconds.
    fn reveal_window_length(&self) -> u64;

    /// Funds held for the current cycle, rollover included.
    fn pool_balance(&self) -> Amount;
}
