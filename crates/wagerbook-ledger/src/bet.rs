//! Bet allocation
//!
//! Stakes are drawn from active bonus accounts oldest-grant first, then from
//! the primary balance. Nothing else decides the order.

use tracing::{debug, warn};
use wagerbook_types::{
    AllocationBreakdown, AllocationEntry, Amount, FundingSource, Result, Severity,
    TransactionKind, WagerbookError, MAIN_LABEL,
};

use crate::wallet::WalletLedger;

impl WalletLedger {
    /// Allocate a stake across bonus accounts and the primary balance.
    ///
    /// Rejections leave the ledger untouched. Only an insufficient-funds
    /// rejection emits a notification.
    pub fn place_bet(&mut self, amount: Amount, room_label: &str) -> Result<AllocationBreakdown> {
        if !amount.is_positive() {
            return Err(WagerbookError::NonPositiveAmount { amount });
        }

        let available = self.total_balance();
        if amount > available {
            warn!(requested = %amount, available = %available, room = room_label, "Bet rejected");
            self.notify(
                format!("Insufficient balance for a {} bet", amount),
                Severity::Error,
            );
            return Err(WagerbookError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        let mut remaining = amount;
        let mut entries = Vec::new();

        for idx in self.fifo_order() {
            if !remaining.is_positive() {
                break;
            }
            let bonus = &mut self.bonuses[idx];
            let deduct = bonus.amount.min(remaining);
            if deduct.is_positive() {
                bonus.amount -= deduct;
                bonus.record_wager(deduct);
                remaining -= deduct;
                entries.push(AllocationEntry::new(
                    FundingSource::Bonus(bonus.id),
                    bonus.label.clone(),
                    deduct,
                ));
            }
        }

        if remaining.is_positive() {
            self.main_balance -= remaining;
            // Main-wallet play counts toward every outstanding bonus
            for bonus in self.bonuses.iter_mut().filter(|b| b.is_active()) {
                bonus.record_wager(remaining);
            }
            entries.push(AllocationEntry::new(FundingSource::Main, MAIN_LABEL, remaining));
        }

        let breakdown = AllocationBreakdown::from_entries(entries);
        self.record(
            TransactionKind::Bet,
            format!("Bet - {}", room_label),
            -amount,
            breakdown.describe(),
        );

        debug!(
            amount = %amount,
            room = room_label,
            allocation = %breakdown.describe(),
            "Bet placed"
        );
        Ok(breakdown)
    }

    /// Indices of active bonus accounts by ascending grant time.
    ///
    /// The sort is stable, so equal grant times keep insertion order.
    pub(crate) fn fifo_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = self
            .bonuses
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_active())
            .map(|(i, _)| i)
            .collect();
        order.sort_by_key(|&i| self.bonuses[i].granted_at);
        order
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use wagerbook_types::{BonusGrant, BonusKind, BonusStatus};

    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::notify::InMemorySink;

    fn setup() -> (WalletLedger, Arc<ManualClock>, Arc<InMemorySink>) {
        let clock = Arc::new(ManualClock::starting_now());
        let sink = Arc::new(InMemorySink::new());
        let ledger = WalletLedger::new(Amount::major(5000), clock.clone(), sink.clone());
        (ledger, clock, sink)
    }

    #[test]
    fn test_bonus_first_then_main() {
        let (mut ledger, clock, _) = setup();
        let b1 = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)));
        clock.advance(Duration::minutes(5));
        let b2 = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Deposit, Amount::major(500)));

        let breakdown = ledger.place_bet(Amount::major(300), "Deep Sea").unwrap();

        let lines: Vec<_> = breakdown.iter().map(|e| (e.source, e.amount)).collect();
        assert_eq!(
            lines,
            vec![
                (FundingSource::Bonus(b1.id), Amount::major(200)),
                (FundingSource::Bonus(b2.id), Amount::major(100)),
            ]
        );
        assert_eq!(ledger.main_balance(), Amount::major(5000));
        assert_eq!(ledger.bonus(b2.id).unwrap().amount, Amount::major(400));
    }

    #[test]
    fn test_older_grant_wins_regardless_of_insertion() {
        let (mut ledger, clock, _) = setup();
        let newer = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Deposit, Amount::major(100)));
        // Seed an older account after the newer one
        let mut older = newer.clone();
        older.id = wagerbook_types::BonusId(9);
        older.granted_at = clock.now() - Duration::hours(1);
        ledger.restore_bonus(older);

        let breakdown = ledger.place_bet(Amount::major(50), "room").unwrap();
        assert_eq!(breakdown.entries()[0].source, FundingSource::Bonus(wagerbook_types::BonusId(9)));
    }

    #[test]
    fn test_equal_grant_times_keep_insertion_order() {
        let (mut ledger, _, _) = setup();
        let first = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(10)));
        let second = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Deposit, Amount::major(10)));
        let breakdown = ledger.place_bet(Amount::major(15), "room").unwrap();
        assert_eq!(breakdown.entries()[0].source, FundingSource::Bonus(first.id));
        assert_eq!(breakdown.entries()[1].source, FundingSource::Bonus(second.id));
    }

    #[test]
    fn test_main_portion_counts_toward_every_active_bonus() {
        let (mut ledger, clock, _) = setup();
        let b1 = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)));
        clock.advance(Duration::seconds(1));
        let b2 = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Deposit, Amount::major(500)));
        // Drain b2 out of the way by voiding it, then add a third untouched bonus
        ledger.void_bonus(b2.id);
        clock.advance(Duration::seconds(1));
        let b3 = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::DailyCheck, Amount::ZERO));

        ledger.place_bet(Amount::major(300), "room").unwrap();

        // b1 funded 200 and also counts the 100 from main
        assert_eq!(ledger.bonus(b1.id).unwrap().wager_accumulated, Amount::major(300));
        // b3 funded nothing but still counts main play
        assert_eq!(ledger.bonus(b3.id).unwrap().wager_accumulated, Amount::major(100));
        // Voided bonus is untouched
        let voided = ledger.bonus(b2.id).unwrap();
        assert_eq!(voided.status, BonusStatus::Expired);
        assert_eq!(voided.wager_accumulated, Amount::ZERO);
    }

    #[test]
    fn test_non_positive_amount_is_silent() {
        let (mut ledger, _, sink) = setup();
        assert_eq!(
            ledger.place_bet(Amount::major(-5), "x"),
            Err(WagerbookError::NonPositiveAmount { amount: Amount::major(-5) })
        );
        assert!(ledger.place_bet(Amount::ZERO, "x").is_err());
        assert!(ledger.transactions().is_empty());
        assert!(sink.is_empty());
        assert_eq!(ledger.main_balance(), Amount::major(5000));
    }

    #[test]
    fn test_insufficient_funds_notifies_once_and_changes_nothing() {
        let clock = Arc::new(ManualClock::starting_now());
        let sink = Arc::new(InMemorySink::new());
        let mut ledger = WalletLedger::new(Amount::major(500), clock, sink.clone());
        ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)));
        sink.drain();
        let before = ledger.transactions().len();

        let err = ledger.place_bet(Amount::major(10_000), "x").unwrap_err();

        assert_eq!(
            err,
            WagerbookError::InsufficientFunds {
                requested: Amount::major(10_000),
                available: Amount::major(700),
            }
        );
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.count(Severity::Error), 1);
        assert_eq!(ledger.transactions().len(), before);
        assert_eq!(ledger.total_balance(), Amount::major(700));
    }

    #[test]
    fn test_bet_of_entire_balance_is_allowed() {
        let (mut ledger, _, _) = setup();
        ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)));
        let breakdown = ledger.place_bet(Amount::major(5200), "x").unwrap();
        assert_eq!(breakdown.total(), Amount::major(5200));
        assert_eq!(ledger.total_balance(), Amount::ZERO);
    }

    #[test]
    fn test_bet_transaction_records_breakdown() {
        let (mut ledger, _, _) = setup();
        ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)).with_label("Sign-up"));
        ledger.place_bet(Amount::major(300), "Deep Sea").unwrap();

        let tx = ledger.transactions().latest().unwrap();
        assert_eq!(tx.kind, TransactionKind::Bet);
        assert_eq!(tx.amount, Amount::major(-300));
        assert_eq!(tx.description, "Bet - Deep Sea");
        assert_eq!(tx.source, "Sign-up(-200.00) Main wallet(-100.00)");
    }
}
