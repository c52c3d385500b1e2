//! Round settlement
//!
//! Winnings are split across the sources that funded the bet, in proportion
//! to what each contributed. Every share is rounded half-up to the cent on
//! its own; the small drift against the unrounded total is kept as-is.
//!
//! A share whose bonus account has gone away or is no longer Active is
//! credited to the primary balance instead. Winnings never vanish.

use rust_decimal::Decimal;
use tracing::{info, warn};
use wagerbook_types::{
    AllocationBreakdown, AllocationEntry, Amount, FundingSource, Result, Severity,
    TransactionKind, WagerbookError, WinBreakdown,
};

use crate::wallet::WalletLedger;

impl WalletLedger {
    /// Credit winnings for a previously placed bet.
    ///
    /// `breakdown` must be the value returned by [`WalletLedger::place_bet`];
    /// it is replayed, not re-derived from current state. Wagering completion
    /// is checked afterwards even when nothing was won.
    pub fn settle_round(
        &mut self,
        breakdown: &AllocationBreakdown,
        multiplier: Decimal,
        room_label: &str,
    ) -> Result<WinBreakdown> {
        if multiplier <= Decimal::ZERO {
            return Err(WagerbookError::InvalidMultiplier { multiplier });
        }
        let total_bet = breakdown.total();
        if breakdown.is_empty() || !total_bet.is_positive() {
            return Err(WagerbookError::EmptyBreakdown);
        }

        let winnings = total_bet
            .to_decimal()
            .checked_mul(multiplier)
            .ok_or(WagerbookError::AmountOverflow)
            .and_then(Amount::try_from_decimal)?;

        // Each share is entry / total of the winnings, i.e. entry * multiplier
        let mut credits = Vec::with_capacity(breakdown.len());
        for entry in breakdown {
            let win = entry
                .amount
                .to_decimal()
                .checked_mul(multiplier)
                .ok_or(WagerbookError::AmountOverflow)
                .and_then(Amount::try_from_decimal)?;
            credits.push((entry, self.credit_target(entry), win));
        }
        let (main_balance, bonus_amounts) = self.project_credits(&credits)?;

        self.main_balance = main_balance;
        for (bonus, amount) in self.bonuses.iter_mut().zip(bonus_amounts) {
            bonus.amount = amount;
        }
        let mut entries = Vec::with_capacity(credits.len());
        for (entry, target, win) in credits {
            if let (FundingSource::Bonus(id), None) = (entry.source, target) {
                warn!(bonus = %id, win = %win, "Bonus no longer active, crediting main wallet");
            }
            entries.push(AllocationEntry::new(entry.source, entry.label.clone(), win));
        }

        let result = WinBreakdown {
            entries,
            winnings,
            multiplier,
        };

        self.record(
            TransactionKind::Win,
            format!("Win x{} - {}", multiplier.normalize(), room_label),
            result.winnings,
            result.describe(),
        );
        if result.winnings.is_positive() {
            self.notify(format!("You won {}!", result.winnings), Severity::Success);
        }

        info!(
            stake = %total_bet,
            multiplier = %multiplier,
            winnings = %result.winnings,
            room = room_label,
            "Round settled"
        );

        self.check_wagering_complete();
        Ok(result)
    }

    /// Index of the active bonus a share is credited to; `None` means main
    fn credit_target(&self, entry: &AllocationEntry) -> Option<usize> {
        match entry.source {
            FundingSource::Main => None,
            FundingSource::Bonus(id) => self
                .bonus_index(id)
                .filter(|&idx| self.bonuses[idx].is_active()),
        }
    }

    /// Balances after crediting every share, or an overflow error with
    /// nothing applied. Released bonuses later move to main, so the whole
    /// wallet has to stay representable too.
    fn project_credits(
        &self,
        credits: &[(&AllocationEntry, Option<usize>, Amount)],
    ) -> Result<(Amount, Vec<Amount>)> {
        let mut main = self.main_balance;
        let mut amounts: Vec<Amount> = self.bonuses.iter().map(|b| b.amount).collect();

        for &(_, target, win) in credits {
            match target {
                Some(idx) => amounts[idx] = amounts[idx].checked_add(win)?,
                None => main = main.checked_add(win)?,
            }
        }
        self.bonuses
            .iter()
            .zip(&amounts)
            .filter(|(b, _)| b.is_active())
            .try_fold(main, |acc, (_, amount)| acc.checked_add(*amount))?;

        Ok((main, amounts))
    }
}
