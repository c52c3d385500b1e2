//! Wagerbook Types - Canonical domain types for the bonus-wagering wallet
//!
//! This crate contains the foundational types for wagerbook with zero
//! dependencies on other wagerbook crates. It defines:
//!
//! - Sequence identity types (BonusId, TransactionId, CampaignId)
//! - Fixed-point amounts in minor units
//! - Bonus accounts, their status machine, and grant configuration
//! - Allocation and win breakdowns
//! - Transactions and notifications
//!
//! # Ledger Invariants
//!
//! These types carry the invariants the ledger enforces:
//!
//! 1. A bonus balance is zero whenever its status is not Active
//! 2. Bonus status only moves Active -> Completed or Active -> Expired
//! 3. Accumulated wager never decreases
//! 4. A successful bet breakdown always sums to the requested amount

pub mod identity;
pub mod amount;
pub mod bonus;
pub mod allocation;
pub mod transaction;
pub mod notification;
pub mod error;

pub use identity::*;
pub use amount::*;
pub use bonus::*;
pub use allocation::*;
pub use transaction::*;
pub use notification::*;
pub use error::*;

/// Version of the wagerbook types schema
pub const TYPES_VERSION: &str = "0.1.0";

/// Scope entry that makes a bonus valid for every game category
pub const ALL_SCOPE: &str = "ALL";

/// Display label used for the primary balance in breakdowns
pub const MAIN_LABEL: &str = "Main wallet";

/// Bonus lifetime when a grant does not name one
pub const DEFAULT_EXPIRY_HOURS: u32 = 72;
