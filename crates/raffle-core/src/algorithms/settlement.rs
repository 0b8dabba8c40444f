//! # Settlement
//!
//! Checks and effects of settling a round. The transfer itself (the
//! interaction) is performed by the service, strictly after
//! [`apply_settlement`] has reset the round.

use super::winner::{select_winner, WinnerSelection};
use crate::domain::{
    invariant_deadlines_advance, Phase, RaffleConfig, RaffleError, Round, SettlementOutcome,
    SettlementRecord, Timestamp,
};

/// Settlement decided against a round, not yet applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Cycle being settled.
    pub cycle: u64,
    /// Outcome to apply.
    pub outcome: SettlementOutcome,
    /// Winner draw details (None when void).
    pub selection: Option<WinnerSelection>,
}

/// Validate the phase and compute winner and prize.
///
/// Pure: the winner is recomputed from the entries on every call.
pub fn plan_settlement(round: &Round, now: Timestamp) -> Result<SettlementPlan, RaffleError> {
    let phase = round.phase(now);
    if phase != Phase::Settleable {
        // A cycle opened by a settlement reports the earlier settlement.
        if round.cycle() > 0 {
            return Err(RaffleError::AlreadySettled {
                cycle: round.cycle() - 1,
            });
        }
        return Err(RaffleError::PhaseError {
            expected: Phase::Settleable,
            actual: phase,
        });
    }

    let pool = round.pool_balance();
    let selection = select_winner(round.entries());
    let outcome = match selection {
        Some(selection) => SettlementOutcome::Won {
            winner: selection.winner,
            entry_index: selection.entry_index,
            prize: pool,
        },
        None => SettlementOutcome::Void { rolled_over: pool },
    };

    Ok(SettlementPlan {
        cycle: round.cycle(),
        outcome,
        selection,
    })
}

/// Reset the round for the next cycle according to `plan`.
///
/// A won pool leaves nothing behind; a void pool rolls over.
pub fn apply_settlement(
    round: &mut Round,
    plan: &SettlementPlan,
    now: Timestamp,
    config: &RaffleConfig,
) -> Result<(), RaffleError> {
    let previous = round.deadlines();
    let next = previous.following(now, config.commit_window_secs, config.reveal_window_secs)?;
    debug_assert!(invariant_deadlines_advance(&previous, &next));

    let rollover = match plan.outcome {
        SettlementOutcome::Void { rolled_over } => rolled_over,
        SettlementOutcome::Won { .. } => 0,
    };
    round.reset(
        next,
        rollover,
        SettlementRecord {
            cycle: plan.cycle,
            outcome: plan.outcome,
            settled_at: now,
        },
    );
    Ok(())
}
