//! Raffle Service
//!
//! Orchestrates the round with the injected clock, prize transfer and
//! event publisher.
//!
//! ## Concurrency
//!
//! Every public operation runs inside one transaction on a reentrant lock.
//! Other threads wait; a call made on the same thread from inside the
//! prize transfer re-enters and sees the already-reset round.
//!
//! ## Settlement Order
//!
//! 1. Checks: phase, winner and prize are computed.
//! 2. Effects: the round is reset and the settlement event journaled.
//! 3. Interaction: the prize is transferred.
//!
//! If the transfer fails, the round and the journal are restored from the
//! snapshot taken before the effects, so the whole settlement (including
//! anything a reentrant call did meanwhile) is undone. While a transfer is
//! in flight a nested `settle` is refused with `AlreadySettled`, so no
//! payout can happen inside a settlement that may still be rolled back.
//!
//! Events are published only when the outermost transaction finishes.

use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{debug, info, warn};

use crate::algorithms::{apply_settlement, plan_settlement, process_reveal, record_entry};
use crate::domain::{
    invariant_pool_balance, invariant_stable_indices, Address, Amount, Deadlines, Entry,
    EntryIndex, Hash, Phase, RaffleConfig, RaffleError, RaffleEvent, Round, Salt,
    SettlementOutcome, SettlementRecord,
};
use crate::metrics::{MetricsSnapshot, RaffleMetrics};
use crate::ports::{EventPublisher, NoOpPublisher, PrizeTransfer, RaffleApi, TimeSource};

/// Mutable state behind the lock.
struct RoundCell {
    round: Round,
    /// Events of the open transaction, flushed when it completes.
    journal: Vec<RaffleEvent>,
    /// Nesting depth of open transactions on the owning thread.
    depth: u32,
    /// Set while a prize transfer is in flight.
    paying_out: bool,
}

/// Raffle service implementation
///
/// Implements the `RaffleApi` port using injected dependencies.
pub struct RaffleService<C: TimeSource, T: PrizeTransfer, P: EventPublisher = NoOpPublisher> {
    /// Clock (driven port)
    clock: Arc<C>,
    /// Prize payout (driven port)
    transfer: Arc<T>,
    /// Event sink (driven port)
    publisher: Arc<P>,
    config: RaffleConfig,
    metrics: RaffleMetrics,
    state: ReentrantMutex<RefCell<RoundCell>>,
}

impl<C: TimeSource, T: PrizeTransfer> RaffleService<C, T, NoOpPublisher> {
    /// Create a service that publishes no events.
    pub fn without_events(
        config: RaffleConfig,
        clock: Arc<C>,
        transfer: Arc<T>,
    ) -> Result<Self, RaffleError> {
        Self::new(config, clock, transfer, Arc::new(NoOpPublisher))
    }
}

impl<C: TimeSource, T: PrizeTransfer, P: EventPublisher> RaffleService<C, T, P> {
    /// Create a service and open the first cycle at the clock's current
    /// reading.
    pub fn new(
        config: RaffleConfig,
        clock: Arc<C>,
        transfer: Arc<T>,
        publisher: Arc<P>,
    ) -> Result<Self, RaffleError> {
        let round = Round::open(&config, clock.now())?;
        let deadlines = round.deadlines();
        info!(
            "[raffle] Round opened: price {}, commit until {}, reveal until {}",
            config.ticket_price, deadlines.commit, deadlines.reveal
        );

        Ok(Self {
            clock,
            transfer,
            publisher,
            config,
            metrics: RaffleMetrics::new(),
            state: ReentrantMutex::new(RefCell::new(RoundCell {
                round,
                journal: Vec::new(),
                depth: 0,
                paying_out: false,
            })),
        })
    }

    /// Run `op` as one transaction.
    ///
    /// `op` must not hold a borrow of the cell across calls into ports.
    fn transact<R>(
        &self,
        op: impl FnOnce(&RefCell<RoundCell>) -> Result<R, RaffleError>,
    ) -> Result<R, RaffleError> {
        let guard = self.state.lock();
        guard.borrow_mut().depth += 1;

        let result = op(&*guard);

        let events = {
            let mut state = guard.borrow_mut();
            state.depth -= 1;
            debug_assert!(invariant_pool_balance(&state.round));
            debug_assert!(invariant_stable_indices(&state.round));
            if state.depth == 0 {
                std::mem::take(&mut state.journal)
            } else {
                Vec::new()
            }
        };
        for event in &events {
            self.publisher.publish(event);
        }

        if let Err(err) = &result {
            self.metrics.record_error(err);
        }
        result
    }

    /// Read the round under the lock.
    fn read<R>(&self, f: impl FnOnce(&Round) -> R) -> R {
        let guard = self.state.lock();
        let state = guard.borrow();
        f(&state.round)
    }

    /// Buy one ticket bound to `commitment`.
    ///
    /// Returns the new entry's index.
    pub fn enter(
        &self,
        participant: Address,
        commitment: Hash,
        payment: Amount,
    ) -> Result<EntryIndex, RaffleError> {
        self.transact(|cell| {
            let now = self.clock.now();
            let mut state = cell.borrow_mut();
            let index = record_entry(&mut state.round, now, participant, commitment, payment)
                .inspect_err(|e| debug!("[raffle] Entry rejected: {}", e))?;

            let cycle = state.round.cycle();
            state.journal.push(RaffleEvent::EntryRecorded {
                cycle,
                participant,
                index,
            });
            self.metrics.record_entry();
            debug!(
                "[raffle] Entry {} recorded for {}",
                index,
                hex::encode(participant)
            );
            Ok(index)
        })
    }

    /// Reveal `salt` for one of `participant`'s entries.
    ///
    /// Returns the revealed entry's index.
    pub fn reveal(&self, participant: Address, salt: Salt) -> Result<EntryIndex, RaffleError> {
        self.transact(|cell| {
            let now = self.clock.now();
            let mut state = cell.borrow_mut();
            let index = process_reveal(&mut state.round, now, participant, salt)
                .inspect_err(|e| debug!("[raffle] Reveal rejected: {}", e))?;

            let cycle = state.round.cycle();
            state.journal.push(RaffleEvent::Revealed {
                cycle,
                participant,
                index,
            });
            self.metrics.record_reveal();
            debug!(
                "[raffle] Entry {} revealed by {}",
                index,
                hex::encode(participant)
            );
            Ok(index)
        })
    }

    /// Settle the round: pay the winner (or roll a void pool over) and
    /// open the next cycle.
    pub fn settle(&self) -> Result<SettlementOutcome, RaffleError> {
        self.transact(|cell| {
            let now = self.clock.now();

            let (plan, snapshot, mark) = {
                let mut state = cell.borrow_mut();
                if state.paying_out {
                    let cycle = state.round.cycle().saturating_sub(1);
                    debug!("[raffle] Settlement rejected: payout of cycle {} in flight", cycle);
                    return Err(RaffleError::AlreadySettled { cycle });
                }
                let plan = plan_settlement(&state.round, now)
                    .inspect_err(|e| debug!("[raffle] Settlement rejected: {}", e))?;
                let snapshot = state.round.clone();
                let mark = state.journal.len();

                apply_settlement(&mut state.round, &plan, now, &self.config)?;
                let event = match plan.outcome {
                    SettlementOutcome::Won { winner, prize, .. } => RaffleEvent::WinnerSelected {
                        cycle: plan.cycle,
                        winner,
                        prize,
                        settled_at: now,
                    },
                    SettlementOutcome::Void { rolled_over } => RaffleEvent::RoundVoided {
                        cycle: plan.cycle,
                        rolled_over,
                        settled_at: now,
                    },
                };
                state.journal.push(event);
                state.paying_out = plan.outcome.winner().is_some();
                (plan, snapshot, mark)
            };

            if let SettlementOutcome::Won { winner, prize, .. } = plan.outcome {
                let transferred = self.transfer.transfer(&winner, prize);
                cell.borrow_mut().paying_out = false;
                if let Err(err) = transferred {
                    warn!(
                        "[raffle] Prize transfer of {} failed, cycle {} restored: {}",
                        prize, plan.cycle, err
                    );
                    let mut state = cell.borrow_mut();
                    state.round = snapshot;
                    state.journal.truncate(mark);
                    return Err(RaffleError::TransferFailure(err));
                }
                info!(
                    "[raffle] Cycle {} won by {} (entry {}), prize {}",
                    plan.cycle,
                    hex::encode(winner),
                    plan.selection.map(|s| s.entry_index).unwrap_or_default(),
                    prize
                );
            } else {
                info!("[raffle] Cycle {} void, pool rolls over", plan.cycle);
            }

            self.metrics.record_settlement(plan.outcome.is_void());
            Ok(plan.outcome)
        })
    }

    /// Phase at the current clock reading.
    pub fn current_phase(&self) -> Phase {
        let now = self.clock.now();
        self.read(|round| round.phase(now))
    }

    /// Current deadline pair.
    pub fn deadlines(&self) -> Deadlines {
        self.read(Round::deadlines)
    }

    /// Number of completed settlements.
    pub fn cycle(&self) -> u64 {
        self.read(Round::cycle)
    }

    /// Snapshot of the current cycle's entries.
    pub fn entries(&self) -> Vec<Entry> {
        self.read(|round| round.entries().to_vec())
    }

    /// Entries owned by `participant`.
    pub fn entries_of(&self, participant: &Address) -> Vec<Entry> {
        self.read(|round| round.entries_of(participant).cloned().collect())
    }

    /// Number of revealed entries in the current cycle.
    pub fn revealed_count(&self) -> usize {
        self.read(Round::revealed_count)
    }

    /// Funds held for the current cycle.
    pub fn pool_balance(&self) -> Amount {
        self.read(Round::pool_balance)
    }

    /// Most recent settlement.
    pub fn last_settlement(&self) -> Option<SettlementRecord> {
        self.read(|round| round.last_settlement().copied())
    }

    /// Copy of the whole round.
    pub fn round(&self) -> Round {
        self.read(Round::clone)
    }

    /// Active configuration.
    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    /// Operation counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<C, T, P> RaffleApi for RaffleService<C, T, P>
where
    C: TimeSource,
    T: PrizeTransfer,
    P: EventPublisher,
{
    fn enter(
        &self,
        participant: Address,
        commitment: Hash,
        payment: Amount,
    ) -> Result<usize, RaffleError> {
        RaffleService::enter(self, participant, commitment, payment)
    }

    fn reveal(&self, participant: Address, salt: Salt) -> Result<usize, RaffleError> {
        RaffleService::reveal(self, participant, salt)
    }

    fn settle(&self) -> Result<SettlementOutcome, RaffleError> {
        RaffleService::settle(self)
    }

    fn current_phase(&self) -> Phase {
        RaffleService::current_phase(self)
    }

    fn entries(&self) -> Vec<Entry> {
        RaffleService::entries(self)
    }

    fn ticket_price(&self) -> Amount {
        self.config.ticket_price
    }

    fn commit_window_length(&self) -> u64 {
        self.config.commit_window_secs
    }

    fn reveal_window_length(&self) -> u64 {
        self.config.reveal_window_secs
    }

    fn pool_balance(&self) -> Amount {
        RaffleService::pool_balance(self)
    }
}
