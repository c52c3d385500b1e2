//! Seeded random play against a manual clock

use std::sync::Arc;

use chrono::Duration;
use colored::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::info;
use wagerbook_ledger::{CampaignCatalog, ManualClock, NullSink, WalletLedger};
use wagerbook_types::{Amount, CampaignId, TransactionKind};

use super::build_ledger;
use crate::config::WagerbookConfig;
use crate::display;

/// Chance that a round pays out at all
const WIN_PROBABILITY: f64 = 0.45;

/// Chance that a campaign bonus is granted before a round
const GRANT_PROBABILITY: f64 = 0.08;

/// Totals gathered while simulating
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub rounds: u32,
    pub bets_placed: u32,
    pub bets_rejected: u32,
    pub staked: Amount,
    pub credited: Amount,
    pub winnings: Amount,
    pub granted: Amount,
    pub forfeited: Amount,
}

impl SimulationReport {
    /// Balance the ledger should hold if no money was created or lost
    pub fn expected_total(&self, opening: Amount) -> Amount {
        opening + self.granted - self.staked + self.credited - self.forfeited
    }
}

/// Play `rounds` seeded rounds. Deterministic for a given seed and config.
pub fn simulate(
    config: &WagerbookConfig,
    rounds: u32,
    seed: u64,
    max_bet: Amount,
) -> (WalletLedger, SimulationReport) {
    let mut rng = StdRng::seed_from_u64(seed);
    let clock = Arc::new(ManualClock::starting_now());
    let mut ledger = build_ledger(config, clock.clone(), Arc::new(NullSink));
    let catalog = CampaignCatalog::with_defaults();
    let campaign_ids: Vec<CampaignId> = catalog.list().iter().map(|c| c.id).collect();
    let mut report = SimulationReport::default();

    for _ in 0..rounds {
        report.rounds += 1;
        clock.advance(Duration::minutes(rng.gen_range(5..=60)));
        report.forfeited += forfeited_by(&mut ledger);

        if !campaign_ids.is_empty() && rng.gen_bool(GRANT_PROBABILITY) {
            let id = campaign_ids[rng.gen_range(0..campaign_ids.len())];
            if let Ok(bonus) = catalog.grant_to(id, &mut ledger) {
                report.granted += bonus.amount;
            }
        }

        let stake = Amount::from_minor(rng.gen_range(1..=max_bet.minor().max(1)));
        let breakdown = match ledger.place_bet(stake, "Simulation") {
            Ok(breakdown) => breakdown,
            Err(_) => {
                report.bets_rejected += 1;
                continue;
            }
        };
        report.bets_placed += 1;
        report.staked += stake;

        if rng.gen_bool(WIN_PROBABILITY) {
            let multiplier = Decimal::new(rng.gen_range(11..=100), 1);
            if let Ok(wins) = ledger.settle_round(&breakdown, multiplier, "Simulation") {
                report.credited += wins.credited();
                report.winnings += wins.winnings;
            }
        } else {
            ledger.check_wagering_complete();
        }
    }

    info!(
        rounds = report.rounds,
        placed = report.bets_placed,
        rejected = report.bets_rejected,
        "Simulation finished"
    );
    (ledger, report)
}

/// Run one sweep and total what it forfeited
fn forfeited_by(ledger: &mut WalletLedger) -> Amount {
    let before = ledger.transactions().len();
    ledger.expire_bonuses();
    let added = ledger.transactions().len() - before;
    ledger
        .transactions()
        .recent(added)
        .into_iter()
        .filter(|t| t.kind == TransactionKind::Expire)
        .map(|t| -t.amount)
        .sum()
}

pub fn run(config: &WagerbookConfig, rounds: u32, seed: u64, max_bet: Amount) -> anyhow::Result<()> {
    println!(
        "{} {} rounds, seed {}, max bet {}",
        "Simulating".bright_white().bold(),
        rounds,
        seed,
        max_bet
    );

    let (ledger, report) = simulate(config, rounds, seed, max_bet);

    display::section("Play");
    display::kv("rounds", &report.rounds.to_string());
    display::kv("bets placed", &report.bets_placed.to_string());
    display::kv("bets rejected", &report.bets_rejected.to_string());
    display::kv("staked", &report.staked.to_string());
    display::kv("winnings", &report.winnings.to_string());
    display::kv("rounding drift", &(report.credited - report.winnings).to_string());

    display::section("Bonus statistics");
    display::stats(&ledger.bonus_stats());

    display::section("Wallet");
    display::balances(&ledger);

    display::section("Conservation");
    let expected = report.expected_total(config.ledger.opening_balance());
    if expected == ledger.total_balance() {
        display::success(&format!("total balance {} matches the flow of funds", expected));
        Ok(())
    } else {
        display::error(&format!(
            "expected {}, ledger holds {}",
            expected,
            ledger.total_balance()
        ));
        anyhow::bail!("conservation check failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_conserves_funds() {
        let config = WagerbookConfig::default();
        for seed in [1, 2, 3, 99] {
            let (ledger, report) = simulate(&config, 300, seed, Amount::major(400));
            assert_eq!(
                ledger.total_balance(),
                report.expected_total(config.ledger.opening_balance())
            );
            assert_eq!(report.bets_placed + report.bets_rejected, 300);
        }
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let config = WagerbookConfig::default();
        let (a, ra) = simulate(&config, 100, 7, Amount::major(250));
        let (b, rb) = simulate(&config, 100, 7, Amount::major(250));
        assert_eq!(ra, rb);
        assert_eq!(a.total_balance(), b.total_balance());
        assert_eq!(a.transactions().len(), b.transactions().len());
    }
}
