//! Thread-safe ledger handle
//!
//! Every mutating call takes the lock once and holds it for the whole
//! operation. A balance check and the deduction it guards can never be split
//! by another writer, and settlement sees bonus status from the same critical
//! section it credits in.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use wagerbook_types::{
    AllocationBreakdown, Amount, BonusAccount, BonusGrant, BonusId, Result, WinBreakdown,
};

use crate::wallet::WalletLedger;

/// Cloneable handle to one player's ledger
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<WalletLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: WalletLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn place_bet(&self, amount: Amount, room_label: &str) -> Result<AllocationBreakdown> {
        self.inner.lock().place_bet(amount, room_label)
    }

    pub fn settle_round(
        &self,
        breakdown: &AllocationBreakdown,
        multiplier: Decimal,
        room_label: &str,
    ) -> Result<WinBreakdown> {
        self.inner.lock().settle_round(breakdown, multiplier, room_label)
    }

    pub fn check_wagering_complete(&self) -> Vec<BonusId> {
        self.inner.lock().check_wagering_complete()
    }

    pub fn expire_bonuses(&self) -> Vec<BonusId> {
        self.inner.lock().expire_bonuses()
    }

    pub fn grant_bonus(&self, grant: &BonusGrant) -> BonusAccount {
        self.inner.lock().grant_bonus(grant)
    }

    pub fn void_bonus(&self, id: BonusId) -> Option<Amount> {
        self.inner.lock().void_bonus(id)
    }

    /// A consistent copy of the whole ledger
    pub fn snapshot(&self) -> WalletLedger {
        self.inner.lock().clone()
    }

    /// Run a closure under the lock
    pub fn with<R>(&self, f: impl FnOnce(&mut WalletLedger) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl From<WalletLedger> for SharedLedger {
    fn from(ledger: WalletLedger) -> Self {
        Self::new(ledger)
    }
}
