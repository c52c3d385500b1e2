//! Bonus accounts and grant configuration
//!
//! A bonus account is a restricted balance with its own wagering requirement
//! and expiry. Its status only ever moves forward:
//!
//! ```text
//! Active ──► Completed   (wagering requirement met, balance moved to main)
//!    └─────► Expired     (expiry lapsed or manual void, balance forfeited)
//! ```

use crate::{Amount, BonusId, ALL_SCOPE, DEFAULT_EXPIRY_HOURS};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Campaign kind that produced a bonus
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusKind {
    /// Sign-up reward
    Register,
    /// Deposit match
    Deposit,
    /// Daily check-in reward
    DailyCheck,
    /// VIP rebate
    VipRebate,
    /// Any other campaign kind
    Custom(String),
}

impl BonusKind {
    /// Human-readable default label
    pub fn default_label(&self) -> String {
        match self {
            BonusKind::Register => "Sign-up bonus".to_string(),
            BonusKind::Deposit => "Deposit match".to_string(),
            BonusKind::DailyCheck => "Daily check-in".to_string(),
            BonusKind::VipRebate => "VIP rebate".to_string(),
            BonusKind::Custom(name) => name.clone(),
        }
    }
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusKind::Register => write!(f, "REGISTER"),
            BonusKind::Deposit => write!(f, "DEPOSIT"),
            BonusKind::DailyCheck => write!(f, "DAILY_CHECK"),
            BonusKind::VipRebate => write!(f, "VIP_REBATE"),
            BonusKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Lifecycle status of a bonus account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusStatus {
    Active,
    Completed,
    Expired,
}

impl BonusStatus {
    /// Completed and Expired never transition again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for BonusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusStatus::Active => write!(f, "ACTIVE"),
            BonusStatus::Completed => write!(f, "COMPLETED"),
            BonusStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// A single bonus grant with its own balance, wagering requirement, and expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusAccount {
    /// Stable id
    pub id: BonusId,
    /// Campaign kind
    pub kind: BonusKind,
    /// Display label
    pub label: String,
    /// Remaining balance
    pub amount: Amount,
    /// Balance at grant time
    pub original_amount: Amount,
    /// Wager volume needed to release the balance
    pub wager_required: Amount,
    /// Wager volume counted so far
    pub wager_accumulated: Amount,
    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
    /// Game categories the bonus is valid for
    pub scope: BTreeSet<String>,
    /// Lifecycle status
    pub status: BonusStatus,
    /// Grant time, defines FIFO order
    pub granted_at: DateTime<Utc>,
}

impl BonusAccount {
    pub fn is_active(&self) -> bool {
        self.status == BonusStatus::Active
    }

    /// Whether accumulated wager has reached the requirement
    pub fn wagering_met(&self) -> bool {
        self.wager_accumulated >= self.wager_required
    }

    /// Wager volume still missing, never negative
    pub fn wager_remaining(&self) -> Amount {
        (self.wager_required - self.wager_accumulated).max(Amount::ZERO)
    }

    /// Wagering progress in `[0, 1]`
    pub fn wager_progress(&self) -> Decimal {
        if !self.wager_required.is_positive() {
            return Decimal::ONE;
        }
        let ratio = self.wager_accumulated.to_decimal() / self.wager_required.to_decimal();
        ratio.min(Decimal::ONE).max(Decimal::ZERO)
    }

    /// Whether the expiry has lapsed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the bonus is valid for a game category.
    ///
    /// Metadata for callers; the bet engine does not enforce it.
    pub fn applies_to(&self, category: &str) -> bool {
        self.scope.contains(ALL_SCOPE) || self.scope.contains(category)
    }

    /// Whether the stored fields are consistent with the lifecycle: balances
    /// and wager counters are non-negative, and a closed account holds nothing.
    pub fn is_well_formed(&self) -> bool {
        let balances_ok = !self.amount.is_negative()
            && !self.original_amount.is_negative()
            && !self.wager_required.is_negative()
            && !self.wager_accumulated.is_negative();
        balances_ok && (self.is_active() || self.amount.is_zero())
    }

    /// Count bet volume toward the wagering requirement
    pub fn record_wager(&mut self, volume: Amount) {
        if volume.is_positive() {
            self.wager_accumulated = self.wager_accumulated.saturating_add(volume);
        }
    }

    /// Move Active -> Completed, returning the released balance.
    ///
    /// Returns `None` if the account is not Active.
    pub fn complete(&mut self) -> Option<Amount> {
        self.close(BonusStatus::Completed)
    }

    /// Move Active -> Expired, returning the forfeited balance.
    ///
    /// Returns `None` if the account is not Active.
    pub fn forfeit(&mut self) -> Option<Amount> {
        self.close(BonusStatus::Expired)
    }

    fn close(&mut self, to: BonusStatus) -> Option<Amount> {
        if self.status.is_terminal() {
            return None;
        }
        let released = self.amount;
        self.amount = Amount::ZERO;
        self.status = to;
        Some(released)
    }
}

/// How the grant amount is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantAmount {
    /// A fixed amount
    Fixed(Amount),
    /// A percentage of the current main balance, rounded to whole units
    Percent(Decimal),
}

/// Grant configuration produced by a bonus campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusGrant {
    pub kind: BonusKind,
    /// Label; falls back to the kind's default label
    pub label: Option<String>,
    pub amount: GrantAmount,
    /// Wager requirement as a multiple of the granted amount (zero or unset means 1)
    pub wager_multiplier: Option<Decimal>,
    /// Lifetime in hours (zero or unset means 72)
    pub expiry_hours: Option<u32>,
    /// Applicable game categories; empty means all
    pub scope: BTreeSet<String>,
    /// Cap for percent grants; zero means uncapped
    pub max_grant: Option<Amount>,
}

impl BonusGrant {
    /// Create a fixed-amount grant
    pub fn fixed(kind: BonusKind, amount: Amount) -> Self {
        Self::new(kind, GrantAmount::Fixed(amount))
    }

    /// Create a percent-of-main grant
    pub fn percent(kind: BonusKind, percent: Decimal) -> Self {
        Self::new(kind, GrantAmount::Percent(percent))
    }

    fn new(kind: BonusKind, amount: GrantAmount) -> Self {
        Self {
            kind,
            label: None,
            amount,
            wager_multiplier: None,
            expiry_hours: None,
            scope: BTreeSet::new(),
            max_grant: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_wager_multiplier(mut self, multiplier: Decimal) -> Self {
        self.wager_multiplier = Some(multiplier);
        self
    }

    pub fn with_expiry_hours(mut self, hours: u32) -> Self {
        self.expiry_hours = Some(hours);
        self
    }

    pub fn with_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_grant(mut self, cap: Amount) -> Self {
        self.max_grant = Some(cap);
        self
    }

    /// Resolve the granted amount against the current main balance.
    ///
    /// A percent grant on a negative main balance yields zero.
    pub fn resolve_amount(&self, main_balance: Amount) -> Amount {
        match self.amount {
            GrantAmount::Fixed(amount) => amount.max(Amount::ZERO),
            GrantAmount::Percent(percent) => {
                let raw = main_balance.percent_whole(percent);
                let capped = match self.max_grant.filter(|cap| !cap.is_zero()) {
                    Some(cap) => raw.min(cap),
                    None => raw,
                };
                capped.max(Amount::ZERO)
            }
        }
    }

    /// Wager multiplier, with an unset or zero multiplier replaced by `default`
    pub fn multiplier_or(&self, default: Decimal) -> Decimal {
        self.wager_multiplier
            .filter(|m| !m.is_zero())
            .unwrap_or(default)
    }

    /// Label to display on the account
    pub fn resolved_label(&self) -> String {
        self.label
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.kind.default_label())
    }

    /// Scope with the empty set mapped to `ALL`
    pub fn resolved_scope(&self) -> BTreeSet<String> {
        if self.scope.is_empty() {
            BTreeSet::from([ALL_SCOPE.to_string()])
        } else {
            self.scope.clone()
        }
    }

    /// Lifetime as a duration
    pub fn lifetime(&self, default_hours: u32) -> Duration {
        let hours = self
            .expiry_hours
            .filter(|h| *h > 0)
            .unwrap_or(default_hours);
        Duration::hours(i64::from(hours))
    }

    /// Lifetime with the crate-wide default
    pub fn default_lifetime(&self) -> Duration {
        self.lifetime(DEFAULT_EXPIRY_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> BonusAccount {
        let now = Utc::now();
        BonusAccount {
            id: BonusId(1),
            kind: BonusKind::Register,
            label: "Sign-up bonus".to_string(),
            amount: Amount::major(200),
            original_amount: Amount::major(200),
            wager_required: Amount::major(3000),
            wager_accumulated: Amount::major(1200),
            expires_at: now + Duration::hours(48),
            scope: BTreeSet::from([ALL_SCOPE.to_string()]),
            status: BonusStatus::Active,
            granted_at: now - Duration::hours(24),
        }
    }

    #[test]
    fn test_complete_releases_balance_once() {
        let mut b = account();
        assert_eq!(b.complete(), Some(Amount::major(200)));
        assert_eq!(b.status, BonusStatus::Completed);
        assert!(b.amount.is_zero());

        // Terminal: neither transition applies again
        assert_eq!(b.complete(), None);
        assert_eq!(b.forfeit(), None);
        assert_eq!(b.status, BonusStatus::Completed);
    }

    #[test]
    fn test_forfeit_zeroes_balance() {
        let mut b = account();
        assert_eq!(b.forfeit(), Some(Amount::major(200)));
        assert_eq!(b.status, BonusStatus::Expired);
        assert!(b.amount.is_zero());
        assert_eq!(b.complete(), None);
    }

    #[test]
    fn test_wager_progress_and_remaining() {
        let mut b = account();
        assert_eq!(b.wager_remaining(), Amount::major(1800));
        assert_eq!(b.wager_progress(), dec!(0.4));
        b.record_wager(Amount::major(2000));
        assert!(b.wagering_met());
        assert_eq!(b.wager_remaining(), Amount::ZERO);
        assert_eq!(b.wager_progress(), Decimal::ONE);
    }

    #[test]
    fn test_record_wager_ignores_non_positive() {
        let mut b = account();
        b.record_wager(Amount::from_minor(-500));
        b.record_wager(Amount::ZERO);
        assert_eq!(b.wager_accumulated, Amount::major(1200));
    }

    #[test]
    fn test_scope_all_applies_everywhere() {
        let mut b = account();
        assert!(b.applies_to("FISHING"));
        b.scope = BTreeSet::from(["SLOT".to_string()]);
        assert!(b.applies_to("SLOT"));
        assert!(!b.applies_to("FISHING"));
    }

    #[test]
    fn test_percent_grant_is_capped_and_rounded() {
        let grant = BonusGrant::percent(BonusKind::Deposit, dec!(50)).with_max_grant(Amount::major(1000));
        assert_eq!(grant.resolve_amount(Amount::major(5000)), Amount::major(1000));
        assert_eq!(grant.resolve_amount(Amount::major(1001)), Amount::major(501));
        assert_eq!(grant.resolve_amount(Amount::major(-50)), Amount::ZERO);
    }

    #[test]
    fn test_grant_defaults() {
        let grant = BonusGrant::fixed(BonusKind::DailyCheck, Amount::major(50));
        assert_eq!(grant.resolved_label(), "Daily check-in");
        assert_eq!(grant.resolved_scope(), BTreeSet::from(["ALL".to_string()]));
        assert_eq!(grant.default_lifetime(), Duration::hours(72));
        assert_eq!(grant.with_expiry_hours(24).default_lifetime(), Duration::hours(24));
    }

    #[test]
    fn test_zero_grant_settings_fall_back_to_defaults() {
        let grant = BonusGrant::fixed(BonusKind::Register, Amount::major(200))
            .with_wager_multiplier(Decimal::ZERO)
            .with_expiry_hours(0);
        assert_eq!(grant.multiplier_or(Decimal::ONE), Decimal::ONE);
        assert_eq!(grant.lifetime(72), Duration::hours(72));
        assert_eq!(
            grant.clone().with_wager_multiplier(dec!(15)).multiplier_or(Decimal::ONE),
            dec!(15)
        );

        let uncapped = BonusGrant::percent(BonusKind::Deposit, dec!(50)).with_max_grant(Amount::ZERO);
        assert_eq!(uncapped.resolve_amount(Amount::major(5000)), Amount::major(2500));
    }

    #[test]
    fn test_well_formed_accounts() {
        let mut b = account();
        assert!(b.is_well_formed());

        b.status = BonusStatus::Expired;
        assert!(!b.is_well_formed());
        b.amount = Amount::ZERO;
        assert!(b.is_well_formed());

        let mut negative = account();
        negative.amount = Amount::from_minor(-1);
        assert!(!negative.is_well_formed());

        let mut negative_wager = account();
        negative_wager.wager_accumulated = Amount::from_minor(-1);
        assert!(!negative_wager.is_well_formed());
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&BonusKind::DailyCheck).unwrap();
        assert_eq!(json, "\"DAILY_CHECK\"");
        let status = serde_json::to_string(&BonusStatus::Expired).unwrap();
        assert_eq!(status, "\"EXPIRED\"");
    }
}
