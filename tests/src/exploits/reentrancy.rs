//! # Payout Reentrancy
//!
//! **Attack:** A winner whose receiving hook calls `settle` again before
//! the first payout returns, trying to be paid twice from one pool.
//!
//! **Defense:** The round is reset before the transfer. The nested call
//! finds a fresh cycle in its commit phase and gets `AlreadySettled`.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Weak};

    use parking_lot::Mutex;

    use crate::harness::{participant, RaffleHarness, TestRaffle};
    use raffle_core::{Address, Amount, RaffleError};

    #[test]
    fn test_nested_settle_cannot_double_pay() {
        let h = RaffleHarness::standard();
        let mallory = participant(0xEE);
        let salt = h.buy(mallory);
        h.buy(participant(1));
        h.to_reveal_phase();
        h.raffle.reveal(mallory, salt.expose()).unwrap();
        h.to_settlement_phase();

        let raffle: Weak<TestRaffle> = Arc::downgrade(&h.raffle);
        let attempts = Arc::new(AtomicUsize::new(0));
        let nested = Arc::new(Mutex::new(Vec::new()));
        let (counter, results) = (attempts.clone(), nested.clone());
        h.ledger
            .set_transfer_hook(Some(Arc::new(move |_: &Address, _: Amount| {
                // Bounded so a broken guard cannot recurse forever.
                if counter.fetch_add(1, Ordering::SeqCst) >= 3 {
                    return;
                }
                if let Some(raffle) = raffle.upgrade() {
                    results.lock().push(raffle.settle());
                }
            })));

        let outcome = h.raffle.settle().unwrap();
        assert_eq!(outcome.winner(), Some(mallory));

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(
            *nested.lock(),
            vec![Err(RaffleError::AlreadySettled { cycle: 0 })]
        );
        assert_eq!(h.ledger.transfers(), vec![(mallory, 2)]);
        assert_eq!(h.raffle.pool_balance(), 0);
    }

    #[test]
    fn test_nested_reveal_after_reset_rejected() {
        let h = RaffleHarness::standard();
        let mallory = participant(0xEE);
        let salt = h.buy(mallory);
        h.to_reveal_phase();
        h.raffle.reveal(mallory, salt.expose()).unwrap();
        h.to_settlement_phase();

        let raffle: Weak<TestRaffle> = Arc::downgrade(&h.raffle);
        let nested = Arc::new(Mutex::new(None));
        let slot = nested.clone();
        let replay = salt.expose();
        h.ledger
            .set_transfer_hook(Some(Arc::new(move |_: &Address, _: Amount| {
                if let Some(raffle) = raffle.upgrade() {
                    *slot.lock() = Some(raffle.reveal(mallory, replay));
                }
            })));

        h.raffle.settle().unwrap();
        assert!(matches!(
            *nested.lock(),
            Some(Err(RaffleError::PhaseError { .. }))
        ));
        assert_eq!(h.raffle.revealed_count(), 0);
    }
}
