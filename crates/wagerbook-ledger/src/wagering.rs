//! Wagering completion and manual voids

use tracing::{info, warn};
use wagerbook_types::{Amount, BonusId, Severity, TransactionKind};

use crate::wallet::WalletLedger;

impl WalletLedger {
    /// Release every active bonus whose wagering requirement is met.
    ///
    /// The remaining balance moves to the primary balance and the account
    /// becomes Completed. Returns the ids released; calling again with nothing
    /// newly qualifying is a no-op.
    pub fn check_wagering_complete(&mut self) -> Vec<BonusId> {
        let mut completed = Vec::new();

        for idx in 0..self.bonuses.len() {
            let bonus = &mut self.bonuses[idx];
            if !bonus.is_active() || !bonus.wagering_met() {
                continue;
            }
            let Some(released) = bonus.complete() else {
                continue;
            };
            let (id, label) = (bonus.id, bonus.label.clone());

            self.main_balance = self.main_balance.saturating_add(released);
            self.record(
                TransactionKind::Transfer,
                format!("{} wagering complete, moved to main wallet", label),
                released,
                format!("{} → MAIN", id),
            );
            self.notify(
                format!("{} wagering complete! {} moved to main wallet", label, released),
                Severity::Success,
            );
            info!(bonus = %id, released = %released, "Bonus wagering complete");
            completed.push(id);
        }

        completed
    }

    /// Forfeit an active bonus by hand.
    ///
    /// Returns the forfeited balance, or `None` if the id is unknown or the
    /// account is no longer Active.
    pub fn void_bonus(&mut self, id: BonusId) -> Option<Amount> {
        let idx = self.bonus_index(id)?;
        let bonus = &mut self.bonuses[idx];
        let voided = bonus.forfeit()?;
        let label = bonus.label.clone();

        self.record(
            TransactionKind::Expire,
            format!("{} manual void", label),
            -voided,
            id.to_string(),
        );
        self.notify(format!("{} voided", label), Severity::Warning);
        warn!(bonus = %id, forfeited = %voided, "Bonus voided");
        Some(voided)
    }
}
