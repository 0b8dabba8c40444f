//! # Commitment Registry
//!
//! Admission of new entries during the commit phase.

use crate::domain::{
    invariant_exact_payment, Address, Amount, EntryIndex, Hash, Phase, RaffleError, Round,
    Timestamp,
};

/// Record a paid entry.
///
/// Checks run before any mutation, so a rejected call leaves the round
/// untouched:
/// 1. phase is Commit
/// 2. payment equals the ticket price
/// 3. the pool does not overflow
pub fn record_entry(
    round: &mut Round,
    now: Timestamp,
    participant: Address,
    commitment: Hash,
    paid: Amount,
) -> Result<EntryIndex, RaffleError> {
    round.require_phase(Phase::Commit, now)?;
    invariant_exact_payment(round.ticket_price(), paid)?;
    round
        .pool_balance()
        .checked_add(paid)
        .ok_or(RaffleError::ArithmeticOverflow)?;

    Ok(round.push_entry(participant, commitment))
}
