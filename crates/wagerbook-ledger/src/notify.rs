//! Notification sinks
//!
//! The ledger hands each [`Notification`] to a sink and moves on. Sinks must
//! not block and must not fail loudly: a dropped notification never affects
//! ledger state.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use wagerbook_types::{Notification, Severity};

/// Receiver of fire-and-forget notifications
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

/// In-memory sink for testing
#[derive(Debug, Default)]
pub struct InMemorySink {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }

    /// Take everything received so far
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.write())
    }

    pub fn len(&self) -> usize {
        self.notifications.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.read().is_empty()
    }

    /// Count of notifications with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.notifications
            .read()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}

impl NotificationSink for InMemorySink {
    fn notify(&self, notification: Notification) {
        self.notifications.write().push(notification);
    }
}

/// Forwards notifications to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Info | Severity::Success => {
                info!(severity = ?n.severity, "{}", n.message)
            }
            Severity::Warning => warn!("{}", n.message),
            Severity::Error => error!("{}", n.message),
        }
    }
}

/// Publishes notifications on a tokio broadcast channel
///
/// Sending with no live subscribers drops the notification.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl NotificationSink for BroadcastSink {
    fn notify(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

/// Forwards each notification to several sinks
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl NotificationSink for FanoutSink {
    fn notify(&self, notification: Notification) {
        for sink in &self.sinks {
            sink.notify(notification.clone());
        }
    }
}
