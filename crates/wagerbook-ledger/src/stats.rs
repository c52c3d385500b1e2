//! Bonus statistics

use serde::{Deserialize, Serialize};
use wagerbook_types::{Amount, BonusStatus};

use crate::wallet::WalletLedger;

/// Aggregate view over every bonus account a ledger has seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusStats {
    /// Sum of original grant amounts, all statuses
    pub total_granted: Amount,
    /// Original amounts of accounts that finished wagering
    pub completed_amount: Amount,
    /// Original amounts of accounts that were forfeited
    pub expired_amount: Amount,
    /// Current balance still held by active accounts
    pub active_amount: Amount,
}

impl WalletLedger {
    pub fn bonus_stats(&self) -> BonusStats {
        self.bonuses
            .iter()
            .fold(BonusStats::default(), |mut stats, bonus| {
                stats.total_granted += bonus.original_amount;
                match bonus.status {
                    BonusStatus::Active => stats.active_amount += bonus.amount,
                    BonusStatus::Completed => stats.completed_amount += bonus.original_amount,
                    BonusStatus::Expired => stats.expired_amount += bonus.original_amount,
                }
                stats
            })
    }
}
