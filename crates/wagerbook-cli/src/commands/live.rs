//! Real-time play with the background expiry sweeper

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use colored::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tokio::sync::broadcast::error::RecvError;
use wagerbook_ledger::{
    spawn_expiry_sweeper, BroadcastSink, FanoutSink, SharedLedger, SystemClock, TracingSink,
};
use wagerbook_types::{Amount, BonusAccount, BonusGrant, BonusId, BonusKind, BonusStatus, ALL_SCOPE};

use super::build_ledger;
use crate::config::WagerbookConfig;
use crate::display;

const BET_PERIOD: Duration = Duration::from_millis(700);
const MAX_STAKE_MINOR: i64 = 20_000;

/// A bonus that lapses partway through the session
fn flash_bonus(ledger: &SharedLedger, lifetime: chrono::Duration) {
    ledger.with(|l| {
        let now = l.now();
        let id = BonusId(l.bonuses().len() as u64 + 1);
        l.restore_bonus(BonusAccount {
            id,
            kind: BonusKind::Custom("FLASH".to_string()),
            label: "Flash bonus".to_string(),
            amount: Amount::major(100),
            original_amount: Amount::major(100),
            wager_required: Amount::major(100_000),
            wager_accumulated: Amount::ZERO,
            expires_at: now + lifetime,
            scope: BTreeSet::from([ALL_SCOPE.to_string()]),
            status: BonusStatus::Active,
            granted_at: now,
        })
    });
}

pub async fn run(config: &WagerbookConfig, seconds: u64) -> anyhow::Result<()> {
    println!(
        "{} for {}s, sweeping every {}ms",
        "Live session".bright_white().bold(),
        seconds,
        config.sweeper.interval_ms
    );

    let broadcast = Arc::new(BroadcastSink::new(256));
    let mut notifications = broadcast.subscribe();
    let sink = FanoutSink::new()
        .with(broadcast)
        .with(Arc::new(TracingSink));
    let ledger = SharedLedger::new(build_ledger(config, Arc::new(SystemClock), Arc::new(sink)));

    ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)));
    let half = i64::try_from(seconds / 2).unwrap_or(i64::MAX).max(1);
    flash_bonus(&ledger, chrono::Duration::seconds(half));

    let sweeper = spawn_expiry_sweeper(ledger.clone(), config.sweeper.interval());
    let mut rng = StdRng::from_entropy();
    let mut ticker = tokio::time::interval(BET_PERIOD);
    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);

    display::section("Notifications");
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = ticker.tick() => {
                let stake = Amount::from_minor(rng.gen_range(100..=MAX_STAKE_MINOR));
                if let Ok(breakdown) = ledger.place_bet(stake, "Live") {
                    if rng.gen_bool(0.45) {
                        let multiplier = Decimal::new(rng.gen_range(11..=50), 1);
                        ledger.settle_round(&breakdown, multiplier, "Live").ok();
                    } else {
                        ledger.check_wagering_complete();
                    }
                }
            }
            received = notifications.recv() => match received {
                Ok(n) => display::notification(&n),
                Err(RecvError::Lagged(skipped)) => {
                    display::warning(&format!("{} notifications skipped", skipped));
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    sweeper.abort();

    let snapshot = ledger.snapshot();
    display::section("Wallet");
    display::balances(&snapshot);
    display::bonuses(&snapshot);
    display::section("Bonus statistics");
    display::stats(&snapshot.bonus_stats());
    Ok(())
}
