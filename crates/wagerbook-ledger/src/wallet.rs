//! The wallet ledger aggregate
//!
//! One primary balance plus an insertion-ordered list of bonus accounts,
//! with the transaction log that records every mutation. Bet allocation,
//! settlement, wagering, and expiry live in their own modules as further
//! `impl WalletLedger` blocks.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;
use wagerbook_types::{
    Amount, BonusAccount, BonusGrant, BonusId, BonusStatus, IdSequence, Notification, Severity,
    TransactionKind, DEFAULT_EXPIRY_HOURS,
};

use crate::clock::Clock;
use crate::log::TransactionLog;
use crate::notify::NotificationSink;

/// Ledger-wide defaults
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Bonus lifetime when a grant does not name one
    pub default_expiry_hours: u32,
    /// Wager multiplier when a grant does not name one
    pub default_wager_multiplier: Decimal,
    /// Remaining lifetime under which a countdown is flagged urgent
    pub urgent_threshold: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_expiry_hours: DEFAULT_EXPIRY_HOURS,
            default_wager_multiplier: Decimal::ONE,
            urgent_threshold: Duration::hours(1),
        }
    }
}

/// A player's wallet: primary balance, bonus accounts, and audit trail
#[derive(Clone)]
pub struct WalletLedger {
    pub(crate) main_balance: Amount,
    pub(crate) bonuses: Vec<BonusAccount>,
    pub(crate) log: TransactionLog,
    bonus_ids: IdSequence,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink>,
    config: LedgerConfig,
}

impl WalletLedger {
    /// Create a ledger with an opening primary balance
    pub fn new(
        opening_balance: Amount,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            main_balance: opening_balance,
            bonuses: Vec::new(),
            log: TransactionLog::new(),
            bonus_ids: IdSequence::new(),
            clock,
            sink,
            config: LedgerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Balances ─────────────────────────────────────────────────────────────

    pub fn main_balance(&self) -> Amount {
        self.main_balance
    }

    /// All bonus accounts in insertion order, whatever their status
    pub fn bonuses(&self) -> &[BonusAccount] {
        &self.bonuses
    }

    pub fn bonus(&self, id: BonusId) -> Option<&BonusAccount> {
        self.bonuses.iter().find(|b| b.id == id)
    }

    pub fn active_bonuses(&self) -> impl Iterator<Item = &BonusAccount> {
        self.bonuses.iter().filter(|b| b.status == BonusStatus::Active)
    }

    pub fn total_bonus_balance(&self) -> Amount {
        self.active_bonuses()
            .fold(Amount::ZERO, |acc, b| acc.saturating_add(b.amount))
    }

    /// Primary balance plus every active bonus balance
    pub fn total_balance(&self) -> Amount {
        self.main_balance.saturating_add(self.total_bonus_balance())
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.log
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ── Grants ───────────────────────────────────────────────────────────────

    /// Create a bonus account from a campaign grant.
    ///
    /// Never fails. A zero grant still yields an Active account.
    pub fn grant_bonus(&mut self, grant: &BonusGrant) -> BonusAccount {
        let now = self.clock.now();
        let amount = grant.resolve_amount(self.main_balance);
        let multiplier = grant.multiplier_or(self.config.default_wager_multiplier);
        let label = grant.resolved_label();

        let account = BonusAccount {
            id: self.bonus_ids.next_id(),
            kind: grant.kind.clone(),
            label: label.clone(),
            amount,
            original_amount: amount,
            wager_required: amount.scale(multiplier).max(Amount::ZERO),
            wager_accumulated: Amount::ZERO,
            expires_at: now + grant.lifetime(self.config.default_expiry_hours),
            scope: grant.resolved_scope(),
            status: BonusStatus::Active,
            granted_at: now,
        };
        self.bonuses.push(account.clone());

        self.record(
            TransactionKind::Grant,
            format!("Granted {}", label),
            amount,
            account.id.to_string(),
        );
        self.notify(format!("Received {} {}!", label, amount), Severity::Success);

        info!(
            bonus = %account.id,
            kind = %account.kind,
            amount = %amount,
            wager_required = %account.wager_required,
            expires_at = %account.expires_at,
            "Bonus granted"
        );
        account
    }

    /// Insert an existing bonus account, e.g. when seeding a demo wallet.
    ///
    /// Records no transaction. Returns false (and changes nothing) if the id
    /// is already present or the account is not well formed: negative
    /// balances or wager counters, or a closed account still holding funds.
    pub fn restore_bonus(&mut self, account: BonusAccount) -> bool {
        if self.bonus(account.id).is_some() || !account.is_well_formed() {
            return false;
        }
        self.bonus_ids.reserve_past(account.id.sequence());
        self.bonuses.push(account);
        true
    }

    // ── Internals shared by the engines ─────────────────────────────────────

    pub(crate) fn record(
        &mut self,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: Amount,
        source: impl Into<String>,
    ) {
        let at = self.clock.now();
        self.log.append(kind, description, amount, source, at);
    }

    pub(crate) fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.sink
            .notify(Notification::new(message, severity, self.clock.now()));
    }

    pub(crate) fn bonus_index(&self, id: BonusId) -> Option<usize> {
        self.bonuses.iter().position(|b| b.id == id)
    }
}

impl std::fmt::Debug for WalletLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletLedger")
            .field("main_balance", &self.main_balance)
            .field("bonuses", &self.bonuses)
            .field("transactions", &self.log.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
