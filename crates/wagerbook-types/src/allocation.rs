//! Allocation breakdowns
//!
//! A bet produces an [`AllocationBreakdown`] listing which balances funded it.
//! The breakdown is an immutable value: settlement replays it as-is, even if
//! the bonus accounts it names have since changed status.

use crate::{Amount, BonusId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an allocated amount came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingSource {
    /// The primary balance
    Main,
    /// A bonus account
    Bonus(BonusId),
}

impl FundingSource {
    pub fn is_main(&self) -> bool {
        matches!(self, Self::Main)
    }

    pub fn bonus_id(&self) -> Option<BonusId> {
        match self {
            Self::Bonus(id) => Some(*id),
            Self::Main => None,
        }
    }
}

impl fmt::Display for FundingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FundingSource::Main => write!(f, "MAIN"),
            FundingSource::Bonus(id) => write!(f, "{}", id),
        }
    }
}

/// One funding line of a breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub source: FundingSource,
    pub label: String,
    pub amount: Amount,
}

impl AllocationEntry {
    pub fn new(source: FundingSource, label: impl Into<String>, amount: Amount) -> Self {
        Self {
            source,
            label: label.into(),
            amount,
        }
    }
}

/// Ordered record of how a bet was funded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    entries: Vec<AllocationEntry>,
}

impl AllocationBreakdown {
    pub fn from_entries(entries: Vec<AllocationEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entries
    pub fn total(&self) -> Amount {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Portion drawn from the primary balance
    pub fn main_portion(&self) -> Amount {
        self.entries
            .iter()
            .filter(|e| e.source.is_main())
            .map(|e| e.amount)
            .sum()
    }

    /// Render as `label(-amount) label(-amount)`
    pub fn describe(&self) -> String {
        describe_entries(&self.entries, '-')
    }
}

impl<'a> IntoIterator for &'a AllocationBreakdown {
    type Item = &'a AllocationEntry;
    type IntoIter = std::slice::Iter<'a, AllocationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Winnings credited back per funding source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinBreakdown {
    /// Credited amounts, mirroring the bet breakdown's entries
    pub entries: Vec<AllocationEntry>,
    /// Total stake times multiplier, before per-entry rounding
    pub winnings: Amount,
    /// Multiplier applied
    pub multiplier: Decimal,
}

impl WinBreakdown {
    /// Sum actually credited (may drift from `winnings` by per-entry rounding)
    pub fn credited(&self) -> Amount {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Render as `label(+amount) label(+amount)`
    pub fn describe(&self) -> String {
        describe_entries(&self.entries, '+')
    }
}

fn describe_entries(entries: &[AllocationEntry], sign: char) -> String {
    entries
        .iter()
        .map(|e| format!("{}({}{})", e.label, sign, e.amount))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAIN_LABEL;

    fn breakdown() -> AllocationBreakdown {
        AllocationBreakdown::from_entries(vec![
            AllocationEntry::new(FundingSource::Bonus(BonusId(1)), "Sign-up bonus", Amount::major(200)),
            AllocationEntry::new(FundingSource::Main, MAIN_LABEL, Amount::major(100)),
        ])
    }

    #[test]
    fn test_totals_and_main_portion() {
        let b = breakdown();
        assert_eq!(b.total(), Amount::major(300));
        assert_eq!(b.main_portion(), Amount::major(100));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_describe_formats_each_line() {
        assert_eq!(
            breakdown().describe(),
            "Sign-up bonus(-200.00) Main wallet(-100.00)"
        );
    }

    #[test]
    fn test_source_display() {
        assert_eq!(FundingSource::Main.to_string(), "MAIN");
        assert_eq!(FundingSource::Bonus(BonusId(3)).to_string(), "B003");
        assert_eq!(FundingSource::Bonus(BonusId(3)).bonus_id(), Some(BonusId(3)));
    }
}
