//! # Settlement Safety
//!
//! Payout failure and reentrancy during payout.
//!
//! The round is reset before the prize transfer runs. A failed transfer
//! restores the round exactly as it was, so settlement can be retried; a
//! reentrant call from the recipient sees the fresh cycle.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Weak};

    use parking_lot::Mutex;

    use crate::harness::{participant, RaffleHarness, TestRaffle};
    use raffle_core::{
        compute_commitment, Address, Amount, InMemoryLedger, RaffleConfig, RaffleError,
        SettlementOutcome, TransferError,
    };

    /// One revealed entry by `participant(1)`, clock in the settlement phase.
    fn settleable(h: &RaffleHarness) -> Address {
        let alice = participant(1);
        let salt = h.buy(alice);
        h.buy(participant(2));
        h.to_reveal_phase();
        h.raffle.reveal(alice, salt.expose()).unwrap();
        h.to_settlement_phase();
        alice
    }

    // =========================================================================
    // TRANSFER FAILURE
    // =========================================================================

    #[test]
    fn test_failed_transfer_then_retry() {
        let h = RaffleHarness::standard();
        let alice = settleable(&h);
        let before = h.raffle.round();
        let published = h.events.len();

        h.ledger
            .set_failing(Some(TransferError::Unavailable("bank closed".into())));
        let err = h.raffle.settle().unwrap_err();
        assert_eq!(
            err,
            RaffleError::TransferFailure(TransferError::Unavailable("bank closed".into()))
        );
        assert!(err.is_retryable());

        // Nothing moved: same entries, same pool, same deadlines.
        assert_eq!(h.raffle.round(), before);
        assert_eq!(h.raffle.pool_balance(), 2);
        assert_eq!(h.events.len(), published);
        assert!(h.raffle.last_settlement().is_none());

        h.ledger.set_failing(None);
        let outcome = h.raffle.settle().unwrap();
        assert_eq!(outcome.winner(), Some(alice));
        assert_eq!(h.ledger.balance_of(&alice), 2);
        assert_eq!(h.raffle.metrics().transfer_failures, 1);
        assert_eq!(h.raffle.metrics().rounds_won, 1);
    }

    #[test]
    fn test_insufficient_reserve_blocks_reset() {
        let h = RaffleHarness::with_ledger(RaffleConfig::default(), InMemoryLedger::with_reserve(1));
        settleable(&h);

        assert_eq!(
            h.raffle.settle(),
            Err(RaffleError::TransferFailure(
                TransferError::InsufficientFunds {
                    needed: 2,
                    available: 1
                }
            ))
        );
        assert_eq!(h.raffle.entries().len(), 2);
        assert_eq!(h.raffle.cycle(), 0);
    }

    // =========================================================================
    // DOUBLE SETTLEMENT
    // =========================================================================

    #[test]
    fn test_second_settlement_rejected() {
        let h = RaffleHarness::standard();
        settleable(&h);

        h.raffle.settle().unwrap();
        assert_eq!(
            h.raffle.settle(),
            Err(RaffleError::AlreadySettled { cycle: 0 })
        );
        assert_eq!(h.ledger.transfers().len(), 1);
    }

    #[test]
    fn test_settle_before_first_deadline_is_phase_error() {
        let h = RaffleHarness::standard();
        assert!(matches!(
            h.raffle.settle(),
            Err(RaffleError::PhaseError { .. })
        ));
    }

    // =========================================================================
    // REENTRANCY
    // =========================================================================

    /// Install a hook that runs `f` against the raffle during payout.
    fn on_payout<F>(h: &RaffleHarness, f: F)
    where
        F: Fn(&TestRaffle) + Send + Sync + 'static,
    {
        let raffle: Weak<TestRaffle> = Arc::downgrade(&h.raffle);
        h.ledger
            .set_transfer_hook(Some(Arc::new(move |_: &Address, _: Amount| {
                if let Some(raffle) = raffle.upgrade() {
                    f(&raffle);
                }
            })));
    }

    #[test]
    fn test_reentrant_read_sees_reset_round() {
        let h = RaffleHarness::standard();
        settleable(&h);
        let seen = Arc::new(Mutex::new(None));
        let slot = seen.clone();
        on_payout(&h, move |raffle| {
            *slot.lock() = Some((raffle.entries().len(), raffle.pool_balance(), raffle.cycle()));
        });

        h.raffle.settle().unwrap();
        assert_eq!(*seen.lock(), Some((0, 0, 1)));
    }

    #[test]
    fn test_reentrant_entry_kept_after_successful_payout() {
        let h = RaffleHarness::standard();
        settleable(&h);
        let carol = participant(3);
        on_payout(&h, move |raffle| {
            raffle
                .enter(carol, compute_commitment(&carol, &[3u8; 32]), 1)
                .unwrap();
        });

        h.raffle.settle().unwrap();
        let entries = h.raffle.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].participant, carol);
        assert_eq!(h.raffle.cycle(), 1);
    }

    #[test]
    fn test_reentrant_entry_undone_with_failed_payout() {
        let h = RaffleHarness::standard();
        settleable(&h);
        let before = h.raffle.round();
        let published = h.events.len();

        let carol = participant(3);
        let inner = Arc::new(Mutex::new(None));
        let slot = inner.clone();
        on_payout(&h, move |raffle| {
            *slot.lock() = Some(raffle.enter(carol, compute_commitment(&carol, &[3u8; 32]), 1));
        });
        h.ledger
            .set_failing(Some(TransferError::Rejected("refused".into())));

        assert!(matches!(
            h.raffle.settle(),
            Err(RaffleError::TransferFailure(_))
        ));
        // The nested entry succeeded against the reset round, then was
        // undone together with the settlement.
        assert_eq!(*inner.lock(), Some(Ok(0)));
        assert_eq!(h.raffle.round(), before);
        assert!(h.raffle.entries_of(&carol).is_empty());
        assert_eq!(h.events.len(), published);
    }

    #[test]
    fn test_nested_cycle_cannot_settle_inside_failed_payout() {
        let h = RaffleHarness::standard();
        let alice = settleable(&h);
        let before = h.raffle.round();
        let published = h.events.len();

        // During the payout, play a whole second cycle and try to settle it.
        let bob = participant(9);
        let clock = h.clock.clone();
        let nested = Arc::new(Mutex::new(None));
        let slot = nested.clone();
        on_payout(&h, move |raffle| {
            raffle
                .enter(bob, compute_commitment(&bob, &[9u8; 32]), 1)
                .unwrap();
            clock.set(raffle.deadlines().commit + 1);
            raffle.reveal(bob, [9u8; 32]).unwrap();
            clock.set(raffle.deadlines().reveal + 1);
            *slot.lock() = Some(raffle.settle());
        });
        h.ledger
            .set_failing(Some(TransferError::Rejected("refused".into())));

        assert!(matches!(
            h.raffle.settle(),
            Err(RaffleError::TransferFailure(_))
        ));
        assert_eq!(
            *nested.lock(),
            Some(Err(RaffleError::AlreadySettled { cycle: 0 }))
        );
        assert!(h.ledger.transfers().is_empty());
        assert_eq!(h.ledger.balance_of(&bob), 0);
        assert_eq!(h.raffle.round(), before);
        assert_eq!(h.events.len(), published);

        // The retry pays the restored pool exactly once.
        h.ledger.set_transfer_hook(None);
        h.ledger.set_failing(None);
        let outcome = h.raffle.settle().unwrap();
        assert_eq!(outcome.winner(), Some(alice));
        assert_eq!(h.ledger.transfers(), vec![(alice, 2)]);
        assert_eq!(h.raffle.last_settlement().map(|r| r.cycle), Some(0));
    }

    #[test]
    fn test_void_settlement_skips_transfer() {
        let h = RaffleHarness::standard();
        h.buy(participant(1));
        h.to_settlement_phase();
        h.ledger
            .set_failing(Some(TransferError::Unavailable("never called".into())));

        assert_eq!(
            h.raffle.settle(),
            Ok(SettlementOutcome::Void { rolled_over: 1 })
        );
    }
}
