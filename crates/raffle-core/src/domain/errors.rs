//! # Domain Errors
//!
//! Error types and primitive aliases for the raffle round.
//!
//! Validation errors (`PhaseError`, `InvalidPayment`, `InvalidReveal`) are
//! local: the rejected operation leaves the round untouched. Only
//! `TransferFailure` crosses operations, because it blocks the reset.

use super::value_objects::Phase;
use thiserror::Error;

/// Hash type (32-byte Keccak-256).
pub type Hash = [u8; 32];

/// Participant address (20-byte).
pub type Address = [u8; 20];

/// Secret salt bound by a commitment (32-byte).
pub type Salt = [u8; 32];

/// Monetary amount in the smallest unit.
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Stable position of an entry within its round.
pub type EntryIndex = usize;

/// Errors raised by the external prize transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Recipient refused the funds.
    #[error("Recipient rejected transfer: {0}")]
    Rejected(String),

    /// Paying account cannot cover the prize.
    #[error("Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds {
        /// Amount the transfer required
        needed: Amount,
        /// Amount that was available
        available: Amount,
    },

    /// Transfer backend could not be reached.
    #[error("Transfer backend unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Ticket price must be non-zero.
    #[error("Ticket price must be greater than zero")]
    ZeroTicketPrice,

    /// Commit window must be non-zero.
    #[error("Commit window must be greater than zero")]
    ZeroCommitWindow,

    /// Reveal window must be non-zero.
    #[error("Reveal window must be greater than zero")]
    ZeroRevealWindow,

    /// A provided value could not be parsed.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting name
        key: String,
        /// Raw value that failed to parse
        value: String,
    },

    /// Serialized configuration could not be decoded.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Raffle error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaffleError {
    /// Operation attempted in the wrong phase.
    #[error("Wrong phase: expected {expected}, actual {actual}")]
    PhaseError {
        /// Phase the operation requires
        expected: Phase,
        /// Phase derived from the current time
        actual: Phase,
    },

    /// Payment differs from the ticket price.
    #[error("Invalid payment: expected {expected}, paid {paid}")]
    InvalidPayment {
        /// Ticket price
        expected: Amount,
        /// Amount attached to the call
        paid: Amount,
    },

    /// No unrevealed commitment of the caller matches the salt.
    #[error("Invalid reveal: no matching unrevealed commitment")]
    InvalidReveal,

    /// Settlement already happened for the previous cycle and the current
    /// cycle has not reached its settlement phase.
    #[error("Round already settled (cycle {cycle})")]
    AlreadySettled {
        /// Cycle that was settled
        cycle: u64,
    },

    /// Prize transfer failed; the round was not reset.
    #[error("Prize transfer failed: {0}")]
    TransferFailure(#[from] TransferError),

    /// Pool or deadline arithmetic overflowed.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Configuration rejected at creation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl RaffleError {
    /// Caller may retry the same operation later (possibly with corrected
    /// input or after time advances).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::PhaseError { .. }
                | Self::InvalidPayment { .. }
                | Self::InvalidReveal
                | Self::AlreadySettled { .. }
                | Self::TransferFailure(_)
        )
    }

    /// Fatal for the current attempt.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::TransferFailure(_))
    }
}
