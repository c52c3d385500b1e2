//! Display utilities for the CLI

use colored::*;
use rust_decimal::Decimal;
use wagerbook_ledger::{BonusStats, WalletLedger};
use wagerbook_types::{
    AllocationBreakdown, Amount, BonusAccount, BonusStatus, Notification, Severity,
    TransactionKind, WinBreakdown,
};

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Print a labeled value
pub fn labeled(label: &str, value: &str) {
    println!("  {}: {}", label.bright_white(), value.bright_cyan());
}

/// Signed amount, green for credits and red for debits
pub fn signed(amount: Amount) -> ColoredString {
    if amount.is_negative() {
        amount.to_string().bright_red()
    } else {
        format!("+{}", amount).bright_green()
    }
}

pub fn notification(n: &Notification) {
    match n.severity {
        Severity::Success => success(&n.message),
        Severity::Error => error(&n.message),
        Severity::Warning => warning(&n.message),
        Severity::Info => info(&n.message),
    }
}

pub fn balances(ledger: &WalletLedger) {
    labeled("Main wallet", &ledger.main_balance().to_string());
    labeled("Bonus", &ledger.total_bonus_balance().to_string());
    labeled("Total", &ledger.total_balance().to_string());
}

pub fn bonus(ledger: &WalletLedger, bonus: &BonusAccount) {
    let status = match bonus.status {
        BonusStatus::Active => "ACTIVE".bright_green(),
        BonusStatus::Completed => "COMPLETED".bright_blue(),
        BonusStatus::Expired => "EXPIRED".bright_black(),
    };
    println!(
        "  {} {} [{}]",
        bonus.id.to_string().bright_white().bold(),
        bonus.label,
        status
    );
    kv("balance", &format!("{} / {}", bonus.amount, bonus.original_amount));
    kv(
        "wagering",
        &format!(
            "{} / {} ({:.1}%)",
            bonus.wager_accumulated,
            bonus.wager_required,
            bonus.wager_progress() * Decimal::ONE_HUNDRED
        ),
    );
    if bonus.is_active() {
        if let Some(countdown) = ledger.countdown(bonus.id) {
            let left = if countdown.urgent {
                countdown.compact().bright_red().to_string()
            } else {
                countdown.compact()
            };
            kv("expires in", &left);
        }
    }
}

pub fn bonuses(ledger: &WalletLedger) {
    if ledger.bonuses().is_empty() {
        info("No bonus accounts");
        return;
    }
    for b in ledger.bonuses() {
        bonus(ledger, b);
    }
}

pub fn allocation(breakdown: &AllocationBreakdown) {
    for entry in breakdown {
        println!(
            "    {:<24} {:>12}  {}",
            entry.label,
            signed(-entry.amount),
            entry.source.to_string().bright_black()
        );
    }
}

pub fn winnings(wins: &WinBreakdown) {
    for entry in &wins.entries {
        println!(
            "    {:<24} {:>12}  {}",
            entry.label,
            signed(entry.amount),
            entry.source.to_string().bright_black()
        );
    }
    kv("winnings", &wins.winnings.to_string());
}

pub fn transactions(ledger: &WalletLedger, limit: usize) {
    for tx in ledger.transactions().recent(limit) {
        let kind = match tx.kind {
            TransactionKind::Grant => "GRANT".bright_green(),
            TransactionKind::Bet => "BET".bright_yellow(),
            TransactionKind::Win => "WIN".bright_cyan(),
            TransactionKind::Transfer => "TRANSFER".bright_blue(),
            TransactionKind::Expire => "EXPIRE".bright_black(),
        };
        println!(
            "  {} {:<8} {:>12}  {}  {}",
            tx.id.to_string().bright_black(),
            kind,
            signed(tx.amount),
            tx.description,
            tx.source.bright_black()
        );
    }
}

pub fn stats(stats: &BonusStats) {
    kv("total granted", &stats.total_granted.to_string());
    kv("completed", &stats.completed_amount.to_string());
    kv("expired", &stats.expired_amount.to_string());
    kv("active", &stats.active_amount.to_string());
}
