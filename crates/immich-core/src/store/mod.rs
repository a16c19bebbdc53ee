// ── Reactive reading store ──
//
// Concurrent storage for the current state of every reading, with
// push-based change notification via `watch` channels. The key set is
// fixed at construction; only states change afterwards.

mod refresh;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{Reading, ReadingDescriptor, ReadingState};

pub use refresh::TickSummary;

/// Holds one [`Reading`] per descriptor.
///
/// Uses `DashMap` for concurrent per-key commits and `watch` channels so
/// consumers can observe snapshots without polling the store.
pub(crate) struct ReadingStore {
    /// Primary storage: descriptor key -> latest reading.
    by_key: DashMap<String, Arc<Reading>>,

    /// Descriptor keys in display order.
    order: Vec<String>,

    /// Ordered snapshot, rebuilt after every commit.
    snapshot: watch::Sender<Arc<Vec<Arc<Reading>>>>,

    /// Completion time of the last full tick.
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl ReadingStore {
    /// Create a store with every reading `Pending`.
    pub(crate) fn new(descriptors: Vec<ReadingDescriptor>) -> Self {
        let by_key = DashMap::new();
        let mut order = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let descriptor = Arc::new(descriptor);
            order.push(descriptor.key.clone());
            by_key.insert(descriptor.key.clone(), Arc::new(Reading::pending(descriptor)));
        }

        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (last_refresh, _) = watch::channel(None);

        let store = Self {
            by_key,
            order,
            snapshot,
            last_refresh,
        };
        store.rebuild_snapshot();
        store
    }

    /// Record a new state for `key`. Returns `false` for unknown keys.
    pub(crate) fn commit(&self, key: &str, state: ReadingState) -> bool {
        let Some(mut entry) = self.by_key.get_mut(key) else {
            return false;
        };
        let descriptor = Arc::clone(&entry.descriptor);
        *entry = Arc::new(Reading {
            descriptor,
            state,
            updated_at: Some(Utc::now()),
        });
        drop(entry);

        self.rebuild_snapshot();
        true
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<Reading>> {
        self.by_key.get(key).map(|r| Arc::clone(r.value()))
    }

    pub(crate) fn descriptors(&self) -> Vec<Arc<ReadingDescriptor>> {
        self.order
            .iter()
            .filter_map(|key| self.by_key.get(key))
            .map(|r| Arc::clone(&r.descriptor))
            .collect()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<Reading>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Reading>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn mark_refreshed(&self) {
        self.last_refresh.send_modify(|t| *t = Some(Utc::now()));
    }

    pub(crate) fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    pub(crate) fn subscribe_ticks(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect readings in display order and broadcast to subscribers.
    ///
    /// Collection happens under the channel's write lock, so concurrent
    /// commits publish in order and the last snapshot sees every commit.
    fn rebuild_snapshot(&self) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| {
            *snap = Arc::new(self.order.iter().filter_map(|key| self.get(key)).collect());
        });
    }
}
