//! # Test Harness
//!
//! A raffle wired to in-memory adapters, with helpers to move the clock
//! between phases.

use std::sync::Arc;

use raffle_core::{
    prepare_ticket, Address, InMemoryEventLog, InMemoryLedger, ManualTimeSource, RaffleConfig,
    RaffleService, SecureSalt,
};

/// Raffle type used throughout the suite.
pub type TestRaffle = RaffleService<ManualTimeSource, InMemoryLedger, InMemoryEventLog>;

/// Raffle plus handles on its adapters.
pub struct RaffleHarness {
    pub clock: Arc<ManualTimeSource>,
    pub ledger: Arc<InMemoryLedger>,
    pub events: Arc<InMemoryEventLog>,
    pub raffle: Arc<TestRaffle>,
}

impl RaffleHarness {
    /// Raffle opened at time 0 with `config`.
    pub fn new(config: RaffleConfig) -> Self {
        Self::with_ledger(config, InMemoryLedger::new())
    }

    /// Raffle opened at time 0 paying out through `ledger`.
    pub fn with_ledger(config: RaffleConfig, ledger: InMemoryLedger) -> Self {
        raffle_telemetry::init_test_logging();

        let clock = Arc::new(ManualTimeSource::new(0));
        let ledger = Arc::new(ledger);
        let events = Arc::new(InMemoryEventLog::new());
        let raffle = Arc::new(
            RaffleService::new(config, clock.clone(), ledger.clone(), events.clone())
                .expect("valid config"),
        );

        Self {
            clock,
            ledger,
            events,
            raffle,
        }
    }

    /// Price 1, commit window 100000s, reveal window 2000s.
    pub fn standard() -> Self {
        Self::new(RaffleConfig::default())
    }

    /// Buy one ticket for `who`, returning the salt to reveal later.
    pub fn buy(&self, who: Address) -> SecureSalt {
        let (commitment, salt) = prepare_ticket(&who);
        self.raffle
            .enter(who, commitment, self.raffle.config().ticket_price)
            .expect("entry accepted");
        salt
    }

    /// Move the clock to the first second of the reveal phase.
    pub fn to_reveal_phase(&self) {
        self.clock.set(self.raffle.deadlines().commit + 1);
    }

    /// Move the clock to the first second the round can be settled.
    pub fn to_settlement_phase(&self) {
        self.clock.set(self.raffle.deadlines().reveal + 1);
    }
}

/// Distinct participant address.
pub fn participant(n: u8) -> Address {
    [n; 20]
}
