//! In-Memory Ledger Adapter
//!
//! Implements `PrizeTransfer` against an in-memory balance map.

use crate::domain::{Address, Amount, TransferError};
use crate::ports::outbound::PrizeTransfer;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback run at the start of every transfer, before any ledger lock is
/// taken. Lets a recipient call back into the raffle mid-payout.
pub type TransferHook = Arc<dyn Fn(&Address, Amount) + Send + Sync>;

/// In-memory ledger for testing.
///
/// In production, transfers would move real funds.
#[derive(Default)]
pub struct InMemoryLedger {
    balances: RwLock<HashMap<Address, Amount>>,
    transfers: RwLock<Vec<(Address, Amount)>>,
    /// Funds available for payouts; unlimited when `None`.
    reserve: RwLock<Option<Amount>>,
    failure: RwLock<Option<TransferError>>,
    hook: RwLock<Option<TransferHook>>,
}

impl InMemoryLedger {
    /// Create an empty ledger with unlimited reserve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger that can pay out at most `reserve` in total.
    pub fn with_reserve(reserve: Amount) -> Self {
        let ledger = Self::new();
        *ledger.reserve.write() = Some(reserve);
        ledger
    }

    /// Make every transfer fail with `error` until cleared.
    pub fn set_failing(&self, error: Option<TransferError>) {
        *self.failure.write() = error;
    }

    /// Install or clear the transfer hook.
    pub fn set_transfer_hook(&self, hook: Option<TransferHook>) {
        *self.hook.write() = hook;
    }

    /// Credited balance of `address`.
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.balances.read().get(address).copied().unwrap_or(0)
    }

    /// Successful transfers in order.
    pub fn transfers(&self) -> Vec<(Address, Amount)> {
        self.transfers.read().clone()
    }
}

impl PrizeTransfer for InMemoryLedger {
    fn transfer(&self, recipient: &Address, amount: Amount) -> Result<(), TransferError> {
        let hook = self.hook.read().clone();
        if let Some(hook) = hook {
            hook(recipient, amount);
        }

        if let Some(error) = self.failure.read().clone() {
            warn!("[raffle] Ledger refusing transfer of {}: {}", amount, error);
            return Err(error);
        }

        {
            let mut reserve = self.reserve.write();
            if let Some(available) = reserve.as_mut() {
                if amount > *available {
                    return Err(TransferError::InsufficientFunds {
                        needed: amount,
                        available: *available,
                    });
                }
                *available -= amount;
            }
        }

        debug!(
            "[raffle] Crediting {} to {}",
            amount,
            hex::encode(recipient)
        );
        let mut balances = self.balances.write();
        let balance = balances.entry(*recipient).or_insert(0);
        *balance = balance.saturating_add(amount);
        self.transfers.write().push((*recipient, amount));
        Ok(())
    }
}
