//! Host-driven expiry sweeping
//!
//! The ledger never schedules itself. A host that wants timed expiry spawns
//! this task and aborts the handle when done.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::shared::SharedLedger;

/// Sweep expired bonuses every `period` until the handle is aborted
pub fn spawn_expiry_sweeper(ledger: SharedLedger, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let expired = ledger.expire_bonuses();
            if !expired.is_empty() {
                debug!(count = expired.len(), "Sweeper expired bonuses");
            }
        }
    })
}
