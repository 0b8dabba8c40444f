//! # Raffle Core
//!
//! Commit-reveal raffle: participants buy tickets bound to a hidden salt,
//! reveal the salt later, and the revealed salts jointly pick the winner,
//! who receives the whole pool.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Round Lifecycle
//!
//! | Phase | Window | Allowed |
//! |-------|--------|---------|
//! | Commit | `now <= commit deadline` | `enter` |
//! | Reveal | `commit < now <= reveal deadline` | `reveal` |
//! | Settleable | `now > reveal deadline` | `settle` |
//!
//! The phase is derived from the clock on every call. Settlement resets
//! the round and opens the next cycle; a round with no reveals is void and
//! its pool rolls over.
//!
//! ## Security Properties
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Hidden choice | `Keccak256(address ∥ salt)` commitment |
//! | No salt replay | Commitment binds the participant address |
//! | Payout safety | Reset before transfer, full rollback on failure |
//! | Reentrancy | Reentrant lock; nested calls see the reset round |
//!
//! ## Module Structure
//!
//! ```text
//! raffle-core/
//! ├── domain/          # Round, Entry, Phase, config, errors, events
//! ├── algorithms/      # Commitment, registry, reveal, winner, settlement
//! ├── ports/           # RaffleApi, TimeSource, PrizeTransfer, EventPublisher
//! ├── adapters/        # In-memory clock, ledger, event log
//! ├── service/         # RaffleService
//! └── metrics          # Operation counters
//! ```
//!
//! ## Example
//!
//! ```
//! use raffle_core::{
//!     prepare_ticket, InMemoryLedger, ManualTimeSource, RaffleConfig, RaffleService,
//! };
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualTimeSource::new(0));
//! let ledger = Arc::new(InMemoryLedger::new());
//! let raffle =
//!     RaffleService::without_events(RaffleConfig::default(), clock.clone(), ledger.clone())
//!         .unwrap();
//!
//! let alice = [0xA1; 20];
//! let (commitment, salt) = prepare_ticket(&alice);
//! raffle.enter(alice, commitment, 1).unwrap();
//!
//! clock.set(100_001);
//! raffle.reveal(alice, salt.expose()).unwrap();
//!
//! clock.set(102_001);
//! raffle.settle().unwrap();
//! assert_eq!(ledger.balance_of(&alice), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryEventLog, InMemoryLedger, ManualTimeSource, TransferHook};
pub use algorithms::{
    apply_settlement, combine_entropy, compute_commitment, generate_salt, plan_settlement,
    prepare_ticket, process_reveal, record_entry, select_winner, verify_commitment,
    winner_rank, SettlementPlan, WinnerSelection,
};
pub use domain::{
    invariant_deadlines_advance, invariant_exact_payment, invariant_pool_balance,
    invariant_stable_indices, Address, Amount, ConfigError, Deadlines, Entry, EntryIndex, Hash,
    Phase, RaffleConfig, RaffleConfigBuilder, RaffleError, RaffleEvent, Round, Salt, SecureSalt,
    SettlementOutcome, SettlementRecord, Timestamp, TransferError, DEFAULT_COMMIT_WINDOW_SECS,
    DEFAULT_REVEAL_WINDOW_SECS, DEFAULT_TICKET_PRICE,
};
pub use metrics::{MetricsSnapshot, RaffleMetrics};
pub use ports::{
    EventPublisher, NoOpPublisher, PrizeTransfer, RaffleApi, SystemTimeSource, TimeSource,
};
pub use service::RaffleService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
