//! # Commitment Scheme
//!
//! Binding a participant to a hidden salt.
//!
//! A commitment is `Keccak256(address ∥ salt)`. Hashing the address with
//! the salt stops one participant's revealed salt from opening another
//! participant's commitment.

use crate::domain::{Address, Hash, Salt, SecureSalt};
use rand::RngCore;
use sha3::{Digest, Keccak256};

/// Generate a random salt.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Compute the commitment for `participant` and `salt`.
pub fn compute_commitment(participant: &Address, salt: &Salt) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(participant);
    hasher.update(salt);
    hasher.finalize().into()
}

/// Check that `salt` opens `commitment` for `participant`.
pub fn verify_commitment(participant: &Address, salt: &Salt, commitment: &Hash) -> bool {
    compute_commitment(participant, salt) == *commitment
}

/// Prepare a ticket for `participant`.
///
/// Returns (commitment, salt). The commitment goes to `enter`; the salt
/// must be kept by the participant until the reveal phase.
pub fn prepare_ticket(participant: &Address) -> (Hash, SecureSalt) {
    let salt = SecureSalt::new(generate_salt());
    let commitment = compute_commitment(participant, salt.as_bytes());
    (commitment, salt)
}
