use std::sync::Arc;

use tokio::sync::broadcast;

use crate::activity::ActivityLog;
use crate::dispatch::TripLifecycle;
use crate::models::activity::Activity;
use crate::observability::metrics::Metrics;
use crate::store::MemoryStore;

pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub activity: Arc<ActivityLog>,
    pub lifecycle: TripLifecycle,
    pub activity_events_tx: broadcast::Sender<Activity>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize) -> Self {
        let (activity_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);
        let store = Arc::new(MemoryStore::new());
        let activity = Arc::new(ActivityLog::new(store.clone(), activity_events_tx.clone()));
        let lifecycle = TripLifecycle::new(store.clone(), activity.clone());

        Self {
            store,
            activity,
            lifecycle,
            activity_events_tx,
            metrics: Metrics::new(),
        }
    }
}
