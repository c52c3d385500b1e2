//! Fixed-point amounts in minor units
//!
//! Balances are stored as an `i64` count of cents so that repeated bets and
//! settlements never accumulate binary floating-point error. Fractional math
//! (percent grants, multipliers, proportional ratios) goes through
//! [`rust_decimal::Decimal`] and is rounded half-up back to whole cents.

use crate::{Result, WagerbookError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Number of decimal places carried by an [`Amount`]
pub const AMOUNT_DECIMALS: u32 = 2;

/// Minor units per major unit
pub const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount in minor units (cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(pub i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Create from minor units
    pub const fn from_minor(cents: i64) -> Self {
        Self(cents)
    }

    /// Create from whole major units
    pub const fn major(units: i64) -> Self {
        Self(units * MINOR_PER_MAJOR)
    }

    /// Convert a decimal major-unit value, rounding half away from zero to cents.
    ///
    /// Values outside the `i64` cent range saturate.
    pub fn from_decimal(value: Decimal) -> Self {
        Self::try_from_decimal(value).unwrap_or_else(|_| Self::saturated(value.is_sign_negative()))
    }

    /// Convert a decimal major-unit value, failing when it does not fit in cents
    pub fn try_from_decimal(value: Decimal) -> Result<Self> {
        value
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or(WagerbookError::AmountOverflow)
    }

    fn saturated(negative: bool) -> Self {
        if negative {
            Self(i64::MIN)
        } else {
            Self(i64::MAX)
        }
    }

    /// Exact decimal value in major units
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, AMOUNT_DECIMALS)
    }

    /// Raw minor units
    pub fn minor(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a decimal factor, rounding half-up to cents (saturating)
    pub fn scale(&self, factor: Decimal) -> Self {
        match self.to_decimal().checked_mul(factor) {
            Some(value) => Self::from_decimal(value),
            None => Self::saturated(self.is_negative() != factor.is_sign_negative()),
        }
    }

    /// Take `percent`% of this amount, rounded half-up to whole major units (saturating)
    pub fn percent_whole(&self, percent: Decimal) -> Self {
        let raw = self
            .to_decimal()
            .checked_mul(percent)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED));
        match raw {
            Some(raw) => Self::from_decimal(
                raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            ),
            None => Self::saturated(self.is_negative() != percent.is_sign_negative()),
        }
    }

    /// Checked addition
    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(WagerbookError::AmountOverflow)
    }

    /// Checked subtraction
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(WagerbookError::AmountOverflow)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        f.pad(&format!("{}{}.{:02}", sign, abs / per, abs % per))
    }
}

impl FromStr for Amount {
    type Err = WagerbookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| WagerbookError::InvalidAmount {
            input: s.to_string(),
        })?;
        Ok(Self::from_decimal(value))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self(self.0 - other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_pads_cents_and_keeps_sign() {
        assert_eq!(Amount::major(5000).to_string(), "5000.00");
        assert_eq!(Amount::from_minor(-150).to_string(), "-1.50");
        assert_eq!(Amount::from_minor(7).to_string(), "0.07");
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Amount::from_decimal(dec!(1.005)), Amount::from_minor(101));
        assert_eq!(Amount::from_decimal(dec!(1.004)), Amount::from_minor(100));
        assert_eq!(Amount::from_decimal(dec!(-1.005)), Amount::from_minor(-101));
    }

    #[test]
    fn test_percent_rounds_to_whole_units() {
        // 50% of 1234.00 = 617.00
        assert_eq!(Amount::major(1234).percent_whole(dec!(50)), Amount::major(617));
        // 10% of 1235.00 = 123.5 -> 124
        assert_eq!(Amount::major(1235).percent_whole(dec!(10)), Amount::major(124));
    }

    #[test]
    fn test_scale_by_multiplier() {
        assert_eq!(Amount::major(200).scale(dec!(15)), Amount::major(3000));
        assert_eq!(Amount::major(300).scale(dec!(2.5)), Amount::major(750));
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("12.5".parse::<Amount>().unwrap(), Amount::from_minor(1250));
        assert_eq!("300".parse::<Amount>().unwrap(), Amount::major(300));
        assert!("twelve".parse::<Amount>().is_err());
    }

    #[test]
    fn test_sums_and_arithmetic() {
        let total: Amount = [Amount::major(1), Amount::from_minor(50)].iter().sum();
        assert_eq!(total, Amount::from_minor(150));
        let mut a = Amount::major(10);
        a -= Amount::major(3);
        a += Amount::from_minor(1);
        assert_eq!(a, Amount::from_minor(701));
        assert_eq!(-a, Amount::from_minor(-701));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        assert_eq!(
            Amount::from_minor(i64::MAX).checked_add(Amount::from_minor(1)),
            Err(WagerbookError::AmountOverflow)
        );
        assert_eq!(
            Amount::from_minor(i64::MIN).checked_sub(Amount::from_minor(1)),
            Err(WagerbookError::AmountOverflow)
        );
        assert_eq!(
            Amount::major(2).checked_add(Amount::from_minor(50)),
            Ok(Amount::from_minor(250))
        );
        assert_eq!(
            Amount::from_minor(i64::MAX).saturating_add(Amount::major(1)),
            Amount::from_minor(i64::MAX)
        );
    }

    #[test]
    fn test_out_of_range_decimals() {
        assert_eq!(
            Amount::try_from_decimal(Decimal::MAX),
            Err(WagerbookError::AmountOverflow)
        );
        assert_eq!(Amount::from_decimal(Decimal::MAX), Amount::from_minor(i64::MAX));
        assert_eq!(Amount::from_decimal(Decimal::MIN), Amount::from_minor(i64::MIN));
        assert_eq!(Amount::major(10).scale(Decimal::MAX), Amount::from_minor(i64::MAX));
        assert_eq!(Amount::major(10).percent_whole(Decimal::MAX), Amount::from_minor(i64::MAX));
    }
}
