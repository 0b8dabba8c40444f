//! # Domain Invariants
//!
//! Business rules for the raffle round.

use super::entities::Round;
use super::errors::{Amount, RaffleError};
use super::value_objects::Deadlines;

/// Invariant: exact payment.
///
/// Every entry pays the ticket price exactly; over- and under-payment are
/// both rejected in full.
pub fn invariant_exact_payment(ticket_price: Amount, paid: Amount) -> Result<(), RaffleError> {
    if paid != ticket_price {
        return Err(RaffleError::InvalidPayment {
            expected: ticket_price,
            paid,
        });
    }
    Ok(())
}

/// Invariant: pool accounting.
///
/// pool == entries * ticket_price + rollover.
pub fn invariant_pool_balance(round: &Round) -> bool {
    (round.entries().len() as Amount)
        .checked_mul(round.ticket_price())
        .and_then(|stakes| stakes.checked_add(round.rollover()))
        == Some(round.pool_balance())
}

/// Invariant: entry indices match their arena position.
pub fn invariant_stable_indices(round: &Round) -> bool {
    round
        .entries()
        .iter()
        .enumerate()
        .all(|(position, entry)| entry.index == position)
}

/// Invariant: a new cycle's deadlines are strictly later than the old ones.
pub fn invariant_deadlines_advance(previous: &Deadlines, next: &Deadlines) -> bool {
    next.commit > previous.commit && next.reveal > previous.reveal && next.commit < next.reveal
}
