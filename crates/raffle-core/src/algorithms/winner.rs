//! # Winner Selection
//!
//! Winner derivation from the combined revealed salts.
//!
//! ```text
//! entropy = Keccak256(salt_1 ∥ salt_2 ∥ … ∥ salt_k)   (entry index order)
//! rank    = U256(entropy) mod k
//! winner  = participant of the rank-th revealed entry
//! ```
//!
//! ## Known Weakness
//!
//! The last revealer sees every earlier salt before deciding whether to
//! reveal, and so can choose between two outcomes. This is left as is;
//! withholding a reveal still forfeits the stake.

use crate::domain::{Address, Entry, EntryIndex, Hash, Salt};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// Selected winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerSelection {
    /// Winning participant.
    pub winner: Address,
    /// Index of the winning entry.
    pub entry_index: EntryIndex,
    /// Combined entropy used for the draw.
    pub entropy: Hash,
    /// Number of eligible (revealed) entries.
    pub eligible: usize,
}

/// Hash the concatenation of `salts` in the given order.
pub fn combine_entropy<'a>(salts: impl IntoIterator<Item = &'a Salt>) -> Hash {
    let mut hasher = Keccak256::new();
    for salt in salts {
        hasher.update(salt);
    }
    hasher.finalize().into()
}

/// Reduce `entropy` to a rank in `0..eligible`.
///
/// Returns `None` when nothing is eligible.
pub fn winner_rank(entropy: &Hash, eligible: usize) -> Option<usize> {
    if eligible == 0 {
        return None;
    }
    let rank = U256::from_big_endian(entropy) % U256::from(eligible as u64);
    Some(rank.low_u64() as usize)
}

/// Pick the winner among the revealed entries of `entries`.
///
/// Returns `None` if no entry was revealed (the round is void).
pub fn select_winner(entries: &[Entry]) -> Option<WinnerSelection> {
    let revealed: Vec<(&Entry, &Salt)> = entries
        .iter()
        .filter_map(|entry| entry.revealed_salt.as_ref().map(|salt| (entry, salt)))
        .collect();

    let entropy = combine_entropy(revealed.iter().map(|(_, salt)| *salt));
    let rank = winner_rank(&entropy, revealed.len())?;
    let (entry, _) = revealed[rank];

    Some(WinnerSelection {
        winner: entry.participant,
        entry_index: entry.index,
        entropy,
        eligible: revealed.len(),
    })
}
