// ── Central reactive data store ──
//
// The client-side equivalent of the dashboard document: one row per
// device and per timed event, owned here, patched by the poller and the
// command processor. Mutations are broadcast to subscribers via `watch`
// channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::EntityCollection;
use crate::model::{Device, DeviceId, EventId, TimedEvent};
use crate::stream::EntityStream;

/// Central reactive store for hub entities.
///
/// Thread-safe; all reads are snapshot reads, counts derive from the
/// collections themselves so they can never drift from the rows (the
/// dashboard's visible counters are these lengths).
pub struct DataStore {
    pub(crate) devices: EntityCollection<DeviceId, Device>,
    pub(crate) events: EntityCollection<EventId, TimedEvent>,
    pub(crate) last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);

        Self {
            devices: EntityCollection::new(|d: &Device| d.id),
            events: EntityCollection::new(|e: &TimedEvent| e.id),
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn devices_snapshot(&self) -> Arc<Vec<Arc<Device>>> {
        self.devices.snapshot()
    }

    pub fn events_snapshot(&self) -> Arc<Vec<Arc<TimedEvent>>> {
        self.events.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn device(&self, id: DeviceId) -> Option<Arc<Device>> {
        self.devices.get(&id)
    }

    pub fn event(&self, id: EventId) -> Option<Arc<TimedEvent>> {
        self.events.get(&id)
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_devices(&self) -> EntityStream<Device> {
        EntityStream::new(self.devices.subscribe())
    }

    pub fn subscribe_events(&self) -> EntityStream<TimedEvent> {
        EntityStream::new(self.events.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How long ago the last poll was applied, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
