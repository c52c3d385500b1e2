//! Subcommand implementations

pub mod campaigns;
pub mod demo;
pub mod live;
pub mod simulate;

use std::sync::Arc;

use wagerbook_ledger::{Clock, NotificationSink, WalletLedger};

use crate::config::WagerbookConfig;

/// A ledger with the configured opening balance and defaults
pub fn build_ledger(
    config: &WagerbookConfig,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink>,
) -> WalletLedger {
    WalletLedger::new(config.ledger.opening_balance(), clock, sink)
        .with_config(config.ledger.ledger_config())
}
