use std::sync::Arc;

use tokio::sync::broadcast;

use crate::models::activity::{Activity, ActivityCategory};
use crate::store::MemoryStore;

/// Append-only audit feed. `record` must never block or fail a caller's
/// transition, so broadcast errors are swallowed.
pub trait ActivitySink: Send + Sync {
    fn record(&self, msg: &str, category: ActivityCategory);
}

pub struct ActivityLog {
    store: Arc<MemoryStore>,
    events_tx: broadcast::Sender<Activity>,
}

impl ActivityLog {
    pub fn new(store: Arc<MemoryStore>, events_tx: broadcast::Sender<Activity>) -> Self {
        Self { store, events_tx }
    }
}

impl ActivitySink for ActivityLog {
    fn record(&self, msg: &str, category: ActivityCategory) {
        let entry = self.store.create_activity(msg, category);
        // No receivers is normal when no dashboard is watching.
        if let Err(err) = self.events_tx.send(entry) {
            tracing::debug!(error = %err, "activity event dropped");
        }
    }
}
