//! Expiration sweeper and countdowns
//!
//! Expiry is a trigger, never a timer: the host decides when to sweep, and
//! the sweep is safe to run at any cadence.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use wagerbook_types::{BonusId, Severity, TransactionKind};

use crate::wallet::WalletLedger;

impl WalletLedger {
    /// Forfeit every active bonus whose expiry time has passed.
    ///
    /// Returns the ids that moved to Expired. Terminal accounts are never
    /// touched, so repeated sweeps at the same instant do nothing.
    pub fn expire_bonuses(&mut self) -> Vec<BonusId> {
        let now = self.now();
        let mut expired = Vec::new();

        for idx in 0..self.bonuses.len() {
            let bonus = &mut self.bonuses[idx];
            if !bonus.is_active() || !bonus.is_expired_at(now) {
                continue;
            }
            let Some(forfeited) = bonus.forfeit() else {
                continue;
            };
            let (id, label) = (bonus.id, bonus.label.clone());

            self.record(
                TransactionKind::Expire,
                format!("{} expired", label),
                -forfeited,
                id.to_string(),
            );
            self.notify(
                format!("{} expired, {} forfeited", label, forfeited),
                Severity::Warning,
            );
            info!(bonus = %id, forfeited = %forfeited, "Bonus expired");
            expired.push(id);
        }

        expired
    }

    /// Time left on a bonus, measured against the ledger clock
    pub fn countdown(&self, id: BonusId) -> Option<Countdown> {
        let bonus = self.bonus(id)?;
        Some(Countdown::until(
            bonus.expires_at,
            self.now(),
            self.config().urgent_threshold,
        ))
    }
}

/// Remaining lifetime broken into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub expired: bool,
    /// Still running, but under the urgency threshold
    pub urgent: bool,
}

impl Countdown {
    pub fn until(expires_at: DateTime<Utc>, now: DateTime<Utc>, urgent_threshold: Duration) -> Self {
        let remaining = expires_at - now;
        if remaining <= Duration::zero() {
            return Self {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0,
                expired: true,
                urgent: false,
            };
        }

        let total = remaining.num_seconds();
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
            expired: false,
            urgent: remaining < urgent_threshold,
        }
    }

    /// Short form such as `2d 3h`, `45m 10s`, or `expired`
    pub fn compact(&self) -> String {
        if self.expired {
            "expired".to_string()
        } else if self.days > 0 {
            format!("{}d {}h", self.days, self.hours)
        } else if self.hours > 0 {
            format!("{}h {}m", self.hours, self.minutes)
        } else {
            format!("{}m {}s", self.minutes, self.seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wagerbook_types::{Amount, BonusGrant, BonusKind, BonusStatus};

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
    fn test_sweep_forfeits_lapsed_bonuses_once() {
        let (mut ledger, clock, sink) = setup();
        let short = ledger.grant_bonus(
            &BonusGrant::fixed(BonusKind::DailyCheck, Amount::major(50)).with_expiry_hours(1),
        );
        let long = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)));
        sink.drain();

        assert!(ledger.expire_bonuses().is_empty());

        clock.advance(Duration::hours(1));
        assert_eq!(ledger.expire_bonuses(), vec![short.id]);

        let bonus = ledger.bonus(short.id).unwrap();
        assert_eq!(bonus.status, BonusStatus::Expired);
        assert!(bonus.amount.is_zero());
        assert!(ledger.bonus(long.id).unwrap().is_active());
        assert_eq!(ledger.total_balance(), Amount::major(5200));

        let tx = ledger.transactions().latest().unwrap();
        assert_eq!(tx.kind, TransactionKind::Expire);
        assert_eq!(tx.amount, Amount::major(-50));
        assert_eq!(sink.count(Severity::Warning), 1);

        let tx_count = ledger.transactions().len();
        assert!(ledger.expire_bonuses().is_empty());
        assert_eq!(ledger.transactions().len(), tx_count);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_completed_bonus_is_not_expired() {
        let (mut ledger, clock, _) = setup();
        let b = ledger.grant_bonus(
            &BonusGrant::fixed(BonusKind::DailyCheck, Amount::major(10)).with_expiry_hours(1),
        );
        ledger.place_bet(Amount::major(10), "x").unwrap();
        ledger.check_wagering_complete();

        clock.advance(Duration::hours(2));
        assert!(ledger.expire_bonuses().is_empty());
        assert_eq!(ledger.bonus(b.id).unwrap().status, BonusStatus::Completed);
    }

    #[test]
    fn test_countdown_units_and_flags() {
        let now = Utc::now();
        let c = Countdown::until(
            now + Duration::days(2) + Duration::hours(3) + Duration::minutes(4) + Duration::seconds(5),
            now,
            Duration::hours(1),
        );
        assert_eq!((c.days, c.hours, c.minutes, c.seconds), (2, 3, 4, 5));
        assert!(!c.expired);
        assert!(!c.urgent);
        assert_eq!(c.compact(), "2d 3h");

        let soon = Countdown::until(now + Duration::minutes(30), now, Duration::hours(1));
        assert!(soon.urgent);
        assert_eq!(soon.compact(), "30m 0s");

        let gone = Countdown::until(now, now, Duration::hours(1));
        assert!(gone.expired);
        assert!(!gone.urgent);
    }

    #[test]
    fn test_ledger_countdown_uses_its_clock() {
        let (mut ledger, clock, _) = setup();
        let b = ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(1)));
        clock.advance(Duration::hours(71) + Duration::minutes(30));

        let c = ledger.countdown(b.id).unwrap();
        assert_eq!((c.days, c.hours, c.minutes), (0, 0, 30));
        assert!(c.urgent);
        assert!(ledger.countdown(BonusId(404)).is_none());
        assert!(clock.now() < ledger.bonus(b.id).unwrap().expires_at);
    }
}
