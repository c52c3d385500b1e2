//! Append-only transaction log
//!
//! Entries are prepended, so natural iteration order is newest first. One id
//! counter is shared by every transaction kind. Nothing can be edited or
//! removed once recorded.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wagerbook_types::{Amount, IdSequence, Transaction, TransactionId, TransactionKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionLog {
    entries: VecDeque<Transaction>,
    ids: IdSequence,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction and return its id
    pub fn append(
        &mut self,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: Amount,
        source: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> TransactionId {
        let id: TransactionId = self.ids.next_id();
        self.entries.push_front(Transaction {
            id,
            kind,
            description: description.into(),
            amount,
            source: source.into(),
            timestamp,
        });
        id
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Up to `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        self.entries.iter().take(limit).collect()
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries.iter().find(|t| t.id == id)
    }

    pub fn of_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().filter(move |t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_with_shared_counter() {
        let mut log = TransactionLog::new();
        let now = Utc::now();
        let a = log.append(TransactionKind::Grant, "grant", Amount::major(200), "B001", now);
        let b = log.append(TransactionKind::Bet, "bet", Amount::major(-50), "B001(-50.00)", now);
        let c = log.append(TransactionKind::Win, "win", Amount::major(100), "B001(+100.00)", now);

        assert_eq!(a.to_string(), "T001");
        assert_eq!(b.to_string(), "T002");
        assert_eq!(c.to_string(), "T003");

        let order: Vec<_> = log.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![c, b, a]);
        assert_eq!(log.latest().map(|t| t.kind), Some(TransactionKind::Win));
    }

    #[test]
    fn test_queries() {
        let mut log = TransactionLog::new();
        let now = Utc::now();
        for _ in 0..3 {
            log.append(TransactionKind::Bet, "bet", Amount::major(-1), "MAIN", now);
        }
        let g = log.append(TransactionKind::Grant, "grant", Amount::major(5), "B001", now);

        assert_eq!(log.len(), 4);
        assert_eq!(log.recent(2).len(), 2);
        assert_eq!(log.of_kind(TransactionKind::Bet).count(), 3);
        assert_eq!(log.get(g).map(|t| t.amount), Some(Amount::major(5)));
        assert!(log.get(TransactionId(99)).is_none());
    }
}
