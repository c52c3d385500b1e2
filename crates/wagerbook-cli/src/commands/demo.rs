//! Guided walkthrough over a seeded player wallet

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Duration;
use colored::*;
use rust_decimal::Decimal;
use wagerbook_ledger::{
    Clock, FanoutSink, InMemorySink, ManualClock, TracingSink, WalletLedger,
};
use wagerbook_types::{Amount, BonusAccount, BonusId, BonusKind, BonusStatus, ALL_SCOPE};

use super::build_ledger;
use crate::config::WagerbookConfig;
use crate::display;

/// Seed data for one bonus account
struct Seed {
    id: u64,
    kind: BonusKind,
    label: &'static str,
    amount: i64,
    wager: (i64, i64),
    granted_ago: Duration,
    expires_in: Duration,
    scope: &'static [&'static str],
}

fn stock_player() -> [Seed; 3] {
    [
        Seed {
            id: 1,
            kind: BonusKind::Register,
            label: "Sign-up bonus",
            amount: 200,
            wager: (1200, 3000),
            granted_ago: Duration::hours(24),
            expires_in: Duration::hours(48),
            scope: &[ALL_SCOPE],
        },
        Seed {
            id: 2,
            kind: BonusKind::Deposit,
            label: "Deposit boost 50%",
            amount: 500,
            wager: (2500, 10_000),
            granted_ago: Duration::hours(6),
            expires_in: Duration::days(5),
            scope: &["FISHING", "SLOT"],
        },
        Seed {
            id: 3,
            kind: BonusKind::DailyCheck,
            label: "Daily check-in",
            amount: 50,
            wager: (450, 500),
            granted_ago: Duration::minutes(23 * 60 + 30),
            expires_in: Duration::minutes(30),
            scope: &[ALL_SCOPE],
        },
    ]
}

fn seed_player(ledger: &mut WalletLedger) {
    let now = ledger.now();
    for seed in stock_player() {
        ledger.restore_bonus(BonusAccount {
            id: BonusId(seed.id),
            kind: seed.kind,
            label: seed.label.to_string(),
            amount: Amount::major(seed.amount),
            original_amount: Amount::major(seed.amount),
            wager_required: Amount::major(seed.wager.1),
            wager_accumulated: Amount::major(seed.wager.0),
            expires_at: now + seed.expires_in,
            scope: seed.scope.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            status: BonusStatus::Active,
            granted_at: now - seed.granted_ago,
        });
    }
}

fn flush(sink: &InMemorySink) {
    for n in sink.drain() {
        display::notification(&n);
    }
}

pub fn run(config: &WagerbookConfig) -> anyhow::Result<()> {
    println!("{}", "Bonus wallet walkthrough".bright_white().bold());
    println!();
    println!("  • bets drain the {} bonus first, the main wallet last", "oldest".bright_green());
    println!("  • winnings return to each source by its {}", "share".bright_green());
    println!("  • bonuses are {} once wagering is met", "released".bright_green());

    let clock = Arc::new(ManualClock::starting_now());
    let captured = Arc::new(InMemorySink::new());
    let sink = FanoutSink::new()
        .with(captured.clone())
        .with(Arc::new(TracingSink));
    let mut ledger = build_ledger(config, clock.clone(), Arc::new(sink));
    seed_player(&mut ledger);

    display::section("Starting wallet");
    display::balances(&ledger);
    display::bonuses(&ledger);

    display::section("Bet 300.00 in Deep Sea");
    let breakdown = ledger.place_bet(Amount::major(300), "Deep Sea")?;
    display::allocation(&breakdown);
    display::balances(&ledger);
    flush(&captured);

    display::section("Settle at x2.5");
    let wins = ledger.settle_round(&breakdown, Decimal::new(25, 1), "Deep Sea")?;
    display::winnings(&wins);
    flush(&captured);
    display::balances(&ledger);

    display::section("Oversized bet");
    match ledger.place_bet(Amount::major(10_000), "Deep Sea") {
        Ok(_) => display::warning("bet was unexpectedly accepted"),
        Err(e) => display::info(&format!("rejected: {}", e)),
    }
    flush(&captured);

    display::section("Two days later");
    clock.advance(Duration::hours(49));
    display::labeled("Now", &clock.now().format("%Y-%m-%d %H:%M UTC").to_string());
    let expired = ledger.expire_bonuses();
    display::info(&format!("{} bonus(es) expired", expired.len()));
    flush(&captured);

    display::section("Manual void");
    if let Some(voided) = ledger.void_bonus(BonusId(2)) {
        display::info(&format!("B002 voided, {} forfeited", voided));
    }
    flush(&captured);

    display::section("Final wallet");
    display::balances(&ledger);
    display::bonuses(&ledger);

    display::section("Bonus statistics");
    display::stats(&ledger.bonus_stats());

    display::section("Transaction log");
    display::transactions(&ledger, 20);

    println!();
    display::success("Walkthrough complete");
    Ok(())
}
