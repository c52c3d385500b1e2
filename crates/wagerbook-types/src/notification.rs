//! Player-facing notifications
//!
//! The ledger emits these and forgets them. Display duration and removal
//! belong to whatever sink receives them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A fire-and-forget notice for the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub emitted_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, emitted_at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            severity,
            emitted_at,
        }
    }
}
