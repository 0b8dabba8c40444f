//! # Reveal Processor
//!
//! Opening commitments during the reveal phase.
//!
//! Entries that are never revealed keep their stake in the pool but are
//! not eligible to win.

use super::commitment::compute_commitment;
use crate::domain::{Address, EntryIndex, Phase, RaffleError, Round, Salt, Timestamp};

/// Reveal `salt` for one of `participant`'s entries.
///
/// Marks the first (lowest index) unrevealed entry of the participant whose
/// commitment matches. A participant with several entries reveals each one
/// with its own call.
pub fn process_reveal(
    round: &mut Round,
    now: Timestamp,
    participant: Address,
    salt: Salt,
) -> Result<EntryIndex, RaffleError> {
    round.require_phase(Phase::Reveal, now)?;

    let commitment = compute_commitment(&participant, &salt);
    let index = round
        .entries_of(&participant)
        .find(|entry| !entry.is_revealed() && entry.commitment == commitment)
        .map(|entry| entry.index)
        .ok_or(RaffleError::InvalidReveal)?;

    round
        .entry_mut(index)
        .ok_or(RaffleError::InvalidReveal)?
        .reveal(salt)?;
    Ok(index)
}
