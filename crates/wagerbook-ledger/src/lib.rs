//! Wagerbook Ledger - Multi-source wallet with bonus wagering
//!
//! The ledger holds one primary balance and any number of time-limited,
//! wager-restricted bonus accounts. It is:
//! - FIFO-funded (bets drain the oldest active bonus first, the primary balance last)
//! - Proportionally settled (winnings return to each funding source by its share)
//! - Append-only (every mutation records a transaction, newest first)
//! - Clock-injected (time only enters through [`Clock`])
//!
//! # Invariants
//!
//! 1. Grants add funds and settlements add winnings; nothing else creates money
//! 2. A rejected bet or settlement changes nothing
//! 3. Bonus status is terminal once Completed or Expired
//! 4. Winnings whose source bonus has lapsed are credited to the primary balance
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rust_decimal::Decimal;
//! use wagerbook_ledger::{SystemClock, TracingSink, WalletLedger};
//! use wagerbook_types::{Amount, BonusGrant, BonusKind};
//!
//! let mut ledger = WalletLedger::new(
//!     Amount::major(5000),
//!     Arc::new(SystemClock),
//!     Arc::new(TracingSink),
//! );
//! ledger.grant_bonus(&BonusGrant::fixed(BonusKind::Register, Amount::major(200)));
//!
//! let breakdown = ledger.place_bet(Amount::major(300), "Deep Sea").unwrap();
//! ledger.settle_round(&breakdown, Decimal::TWO, "Deep Sea").unwrap();
//! assert_eq!(ledger.total_balance(), Amount::major(5500));
//! ```

pub mod clock;
pub mod notify;
pub mod log;
pub mod wallet;
pub mod bet;
pub mod settlement;
pub mod wagering;
pub mod expiry;
pub mod stats;
pub mod campaign;
pub mod shared;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use notify::{BroadcastSink, FanoutSink, InMemorySink, NotificationSink, NullSink, TracingSink};
pub use log::TransactionLog;
pub use wallet::{LedgerConfig, WalletLedger};
pub use expiry::Countdown;
pub use stats::BonusStats;
pub use campaign::{Campaign, CampaignCatalog, CampaignDraft};
pub use shared::SharedLedger;
pub use scheduler::spawn_expiry_sweeper;
