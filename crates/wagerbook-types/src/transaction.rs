//! Transaction types for wagerbook
//!
//! Every ledger mutation leaves exactly one immutable transaction record.

use crate::{Amount, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ledger mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Bonus granted
    Grant,
    /// Stake deducted
    Bet,
    /// Winnings credited
    Win,
    /// Completed bonus moved to main
    Transfer,
    /// Bonus balance forfeited (lapsed or voided)
    Expire,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionKind::Grant => "GRANT",
            TransactionKind::Bet => "BET",
            TransactionKind::Win => "WIN",
            TransactionKind::Transfer => "TRANSFER",
            TransactionKind::Expire => "EXPIRE",
        };
        f.pad(s)
    }
}

/// An audit record of one ledger mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub description: String,
    /// Signed effect: negative for bets and forfeitures
    pub amount: Amount,
    /// Human-readable funding annotation
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<8} {:>10} {} [{}]",
            self.id, self.kind, self.amount, self.description, self.source
        )
    }
}
