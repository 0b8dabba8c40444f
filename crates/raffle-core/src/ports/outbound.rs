//! Outbound (Driven) ports for the raffle.
//!
//! These traits define the clock, the value transfer and event delivery
//! the raffle depends on.

use crate::domain::{Address, Amount, RaffleEvent, Timestamp, TransferError};

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in seconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Value transfer to the winner.
///
/// Implementations may call back into the raffle; the service has already
/// reset the round when `transfer` runs.
pub trait PrizeTransfer: Send + Sync {
    /// Move `amount` to `recipient`.
    fn transfer(&self, recipient: &Address, amount: Amount) -> Result<(), TransferError>;
}

/// Sink for committed raffle events.
pub trait EventPublisher: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: &RaffleEvent);
}

/// Publisher that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPublisher;

impl EventPublisher for NoOpPublisher {
    fn publish(&self, _event: &RaffleEvent) {}
}
