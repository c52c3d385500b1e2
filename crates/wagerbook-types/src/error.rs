//! Error types for wagerbook
//!
//! Every expected rejection is an explicit variant. None of them leave the
//! ledger partially mutated.

use crate::Amount;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for wagerbook operations
pub type Result<T> = std::result::Result<T, WagerbookError>;

/// wagerbook error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WagerbookError {
    // ========================================================================
    // Bet Errors
    // ========================================================================

    /// Bet amount was zero or negative
    #[error("Bet amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Amount },

    /// Bet exceeds the combined main and bonus balance
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    // ========================================================================
    // Settlement Errors
    // ========================================================================

    /// Win multiplier was zero or negative
    #[error("Win multiplier must be positive, got {multiplier}")]
    InvalidMultiplier { multiplier: Decimal },

    /// Breakdown has no entries or sums to zero
    #[error("Breakdown is empty")]
    EmptyBreakdown,

    // ========================================================================
    // Arithmetic Errors
    // ========================================================================

    /// A balance or win would leave the representable cent range
    #[error("Amount overflow during arithmetic operation")]
    AmountOverflow,

    // ========================================================================
    // Campaign Errors
    // ========================================================================

    /// Campaign not found in the catalog
    #[error("Campaign {campaign_id} not found")]
    CampaignNotFound { campaign_id: String },

    // ========================================================================
    // Input / Configuration Errors
    // ========================================================================

    /// Amount text could not be parsed
    #[error("Invalid amount: {input}")]
    InvalidAmount { input: String },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WagerbookError {
    /// Whether the rejection is reported to the player through a notification
    pub fn is_notified(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}
