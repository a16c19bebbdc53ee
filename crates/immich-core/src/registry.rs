// ── Reading registry ──
//
// Discovers the reading set once, then refreshes every reading on each
// tick. Readings are isolated: one failed fetch never stops the others,
// and every failure lands as an explicit state rather than an early
// return.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tokio::sync::watch;
use tracing::{debug, warn};

use immich_api::ImmichClient;

use crate::model::{
    Reading, ReadingDescriptor, ReadingKind, ReadingState, StaticReading, person_descriptors,
    static_descriptors,
};
use crate::store::{ReadingStore, TickSummary};

/// Polling layer for one server connection.
///
/// The descriptor set is fixed after [`discover`](Self::discover): people
/// added or renamed on the server later do not change it.
pub struct ReadingRegistry {
    client: Arc<ImmichClient>,
    store: ReadingStore,
}

impl ReadingRegistry {
    /// Build the static descriptors plus one per named person.
    ///
    /// Fetches the people list once. If that fails, the failure is logged
    /// and the registry carries only the static readings.
    pub async fn discover(client: Arc<ImmichClient>) -> Self {
        let mut descriptors = static_descriptors();

        match client.get_people().await {
            Ok(snapshot) => {
                let people = person_descriptors(&snapshot);
                debug!(count = people.len(), "discovered person readings");
                descriptors.extend(people);
            }
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "failed to discover person readings");
            }
        }

        Self::with_descriptors(client, descriptors)
    }

    /// Build a registry over an explicit descriptor set.
    pub fn with_descriptors(client: Arc<ImmichClient>, descriptors: Vec<ReadingDescriptor>) -> Self {
        Self {
            client,
            store: ReadingStore::new(descriptors),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn client(&self) -> &Arc<ImmichClient> {
        &self.client
    }

    pub fn descriptors(&self) -> Vec<Arc<ReadingDescriptor>> {
        self.store.descriptors()
    }

    pub fn get(&self, key: &str) -> Option<Arc<Reading>> {
        self.store.get(key)
    }

    /// All readings in descriptor order.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Reading>>> {
        self.store.snapshot()
    }

    /// Receive a fresh snapshot after every committed reading.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Reading>>>> {
        self.store.subscribe()
    }

    /// When the last full tick finished.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.store.last_refresh()
    }

    /// Notified once per finished tick, after every reading is committed.
    pub fn subscribe_ticks(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.store.subscribe_ticks()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Refresh every reading concurrently. Each result is committed as
    /// soon as its fetch completes.
    pub async fn refresh_all(&self) -> TickSummary {
        let descriptors = self.store.descriptors();
        let states = join_all(descriptors.iter().map(|d| self.refresh_descriptor(d))).await;
        self.store.finish_tick(states)
    }

    /// Refresh a single reading. Returns `None` for an unknown key.
    pub async fn refresh(&self, key: &str) -> Option<ReadingState> {
        let descriptor = Arc::clone(&self.store.get(key)?.descriptor);
        Some(self.refresh_descriptor(&descriptor).await)
    }

    async fn refresh_descriptor(&self, descriptor: &ReadingDescriptor) -> ReadingState {
        let state = self.fetch(descriptor).await;
        self.store.commit(&descriptor.key, state);
        state
    }

    /// Fetch the current value for one descriptor and fold the result into
    /// a state.
    async fn fetch(&self, descriptor: &ReadingDescriptor) -> ReadingState {
        let result = match &descriptor.kind {
            ReadingKind::Static(which) => self.fetch_static(*which).await.map(Some),
            ReadingKind::PerPerson { person_name } => self.fetch_person(person_name).await,
        };

        match result {
            Ok(Some(value)) => ReadingState::Fresh(value),
            Ok(None) => ReadingState::Missing,
            Err(e) => {
                warn!(key = %descriptor.key, kind = %e.kind(), error = %e, "error updating reading");
                ReadingState::Errored(e.kind())
            }
        }
    }

    async fn fetch_static(&self, which: StaticReading) -> Result<u64, immich_api::Error> {
        Ok(match which {
            StaticReading::TotalImages => self.client.get_asset_statistics().await?.images,
            StaticReading::TotalVideos => self.client.get_asset_statistics().await?.videos,
            StaticReading::TotalAssets => self.client.get_asset_statistics().await?.total,
            StaticReading::FavoriteAssets => self.client.get_favorite_statistics().await?.total,
            StaticReading::TotalPeople => self.client.get_people().await?.total,
            StaticReading::HiddenPeople => self.client.get_people().await?.hidden,
        })
    }

    /// Re-resolve `person_name` against the current people list.
    /// `Ok(None)` means the person is gone or renamed.
    async fn fetch_person(&self, person_name: &str) -> Result<Option<u64>, immich_api::Error> {
        let snapshot = self.client.get_people().await?;
        let Some(person) = snapshot.find_by_name(person_name) else {
            warn!(person = person_name, "could not find person in people list");
            return Ok(None);
        };

        let stats = self.client.get_person_statistics(&person.id).await?;
        Ok(Some(stats.assets))
    }
}
