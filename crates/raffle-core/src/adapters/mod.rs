//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod clock;
mod event_log;
mod ledger;

pub use clock::ManualTimeSource;
pub use event_log::InMemoryEventLog;
pub use ledger::{InMemoryLedger, TransferHook};
