//! Identity types for wagerbook
//!
//! Identifiers are strongly typed wrappers around a per-ledger sequence number.
//! They render as a prefix plus a zero-padded sequence (`B001`, `T042`) and are
//! never reused once assigned.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the zero-padded sequence in rendered ids
pub const ID_PAD_WIDTH: usize = 3;

/// Macro to generate sequence ID types with common implementations
macro_rules! define_sequence_id {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Prefix used when rendering this id
            pub const PREFIX: &'static str = $prefix;

            /// Create from a sequence number
            pub fn from_sequence(sequence: u64) -> Self {
                Self(sequence)
            }

            /// Get the sequence number
            pub fn sequence(&self) -> u64 {
                self.0
            }

            /// Parse from a rendered string (with or without prefix)
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                let digits = s.strip_prefix($prefix).unwrap_or(s);
                digits.parse::<u64>().ok().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{:0width$}", $prefix, self.0, width = ID_PAD_WIDTH)
            }
        }

        impl From<u64> for $name {
            fn from(sequence: u64) -> Self {
                Self(sequence)
            }
        }
    };
}

define_sequence_id!(BonusId, "B", "Identifier of a bonus account within one ledger");
define_sequence_id!(TransactionId, "T", "Identifier of a transaction log entry");
define_sequence_id!(CampaignId, "EVT", "Identifier of a bonus campaign definition");

/// Monotonic id allocator
///
/// The first id handed out is sequence 1. `reserve_past` lets hosts that seed
/// pre-existing records keep the allocator ahead of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id
    pub fn next_id<T: From<u64>>(&mut self) -> T {
        let id = self.next;
        self.next += 1;
        T::from(id)
    }

    /// Make sure the next allocated sequence is greater than `sequence`
    pub fn reserve_past(&mut self, sequence: u64) {
        if sequence >= self.next {
            self.next = sequence + 1;
        }
    }

    /// Peek at the sequence the next allocation will use
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_render_zero_padded() {
        assert_eq!(BonusId(4).to_string(), "B004");
        assert_eq!(TransactionId(12).to_string(), "T012");
        assert_eq!(CampaignId(1).to_string(), "EVT001");
        assert_eq!(TransactionId(1234).to_string(), "T1234");
    }

    #[test]
    fn test_ids_parse_with_or_without_prefix() {
        assert_eq!(BonusId::parse("B007"), Some(BonusId(7)));
        assert_eq!(BonusId::parse("7"), Some(BonusId(7)));
        assert_eq!(CampaignId::parse("EVT002"), Some(CampaignId(2)));
        assert_eq!(BonusId::parse("Bxyz"), None);
    }

    #[test]
    fn test_sequence_is_monotonic_and_reservable() {
        let mut seq = IdSequence::new();
        let a: TransactionId = seq.next_id();
        let b: TransactionId = seq.next_id();
        assert_eq!(a, TransactionId(1));
        assert_eq!(b, TransactionId(2));

        seq.reserve_past(10);
        let c: TransactionId = seq.next_id();
        assert_eq!(c, TransactionId(11));

        // Reserving behind the cursor never rewinds it
        seq.reserve_past(3);
        assert_eq!(seq.peek(), 12);
    }
}
