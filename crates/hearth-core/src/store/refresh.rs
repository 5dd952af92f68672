// ── Poll application logic ──
//
// Two distinct operations, with deliberately different row-creation
// rules:
//
// * `apply_readings` -- the routine 3-second poll. Patches health and
//   telemetry onto rows that already exist; ids with no row are skipped
//   silently. A device removed client-side between the request and the
//   response must not come back, so routine polls never create rows.
// * `resync_devices` -- full re-registration, run at startup and after a
//   successful add. Every id in the snapshot gets a row (existing rows
//   keep their metadata), rows absent from the snapshot are dropped.

use chrono::Utc;
use tracing::trace;

use hearth_api::models::DevicesData;

use super::DataStore;
use crate::convert::{device_key, reading_update};
use crate::model::{Device, DeviceId, DeviceRole, EventId, Position, TimedEvent};

impl DataStore {
    /// Apply a routine polling snapshot.
    ///
    /// Patch-only: unknown ids are skipped, never registered.
    pub(crate) fn apply_readings(&self, data: &DevicesData) {
        for (raw_id, reading) in data {
            let Some(id) = device_key(raw_id) else {
                trace!(key = %raw_id, "skipping unparseable device key");
                continue;
            };
            let Some(existing) = self.devices.get(&id) else {
                trace!(%id, "skipping reading for unregistered device");
                continue;
            };

            let update = reading_update(reading);
            let mut device = (*existing).clone();
            device.health = update.health;
            if let Some(telemetry) = update.telemetry {
                device.telemetry = telemetry;
            }
            device.last_update = Some(Utc::now());
            self.devices.upsert(device);
        }

        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    /// Re-register the device set from a polling snapshot.
    ///
    /// Rows already present keep their metadata (name, ip, role,
    /// position); new ids get bare discovered rows; rows missing from the
    /// snapshot are dropped. Readings are applied in the same pass.
    pub(crate) fn resync_devices(&self, data: &DevicesData) {
        let ids: Vec<DeviceId> = data.keys().filter_map(|k| device_key(k)).collect();

        for id in &ids {
            if !self.devices.contains(id) {
                self.devices.upsert(Device::discovered(*id));
            }
        }
        self.devices.retain_ids(|id| ids.contains(id));

        self.apply_readings(data);
    }

    /// Attach registration metadata to a device row.
    ///
    /// Used after an add: the hub never reports the new row's id, so the
    /// caller diffs the id set around a resync and annotates the one new
    /// row with what it just registered.
    pub(crate) fn annotate_device(
        &self,
        id: DeviceId,
        name: &str,
        ip: &str,
        role: DeviceRole,
    ) -> bool {
        let Some(existing) = self.devices.get(&id) else {
            return false;
        };
        let mut device = (*existing).clone();
        device.name = Some(name.to_owned());
        device.ip = Some(ip.to_owned());
        device.role = Some(role);
        self.devices.upsert(device);
        true
    }

    /// Record a device's map position.
    pub(crate) fn set_device_position(&self, id: DeviceId, position: Position) -> bool {
        let Some(existing) = self.devices.get(&id) else {
            return false;
        };
        let mut device = (*existing).clone();
        device.position = Some(position);
        self.devices.upsert(device);
        true
    }

    /// Drop a device row. Returns `false` when the row was already gone.
    pub(crate) fn remove_device(&self, id: DeviceId) -> bool {
        self.devices.remove(&id).is_some()
    }

    // ── Events ───────────────────────────────────────────────────────

    pub(crate) fn upsert_event(&self, event: TimedEvent) {
        self.events.upsert(event);
    }

    /// Drop an event row. Returns `false` when the row was already gone.
    pub(crate) fn remove_event(&self, id: EventId) -> bool {
        self.events.remove(&id).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use hearth_api::models::DeviceReading;

    use super::*;
    use crate::model::{DeviceHealth, EventKind};

    fn ok_reading(lightness: i64, led: i64) -> DeviceReading {
        DeviceReading {
            result: "success".into(),
            lightness: Some(lightness),
            relay_state: Some("off".into()),
            led_state: Some(led),
            error: None,
        }
    }

    fn err_reading(msg: &str) -> DeviceReading {
        DeviceReading {
            result: "error".into(),
            lightness: None,
            relay_state: None,
            led_state: None,
            error: Some(msg.into()),
        }
    }

    fn snapshot(entries: Vec<(&str, DeviceReading)>) -> DevicesData {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn routine_poll_never_creates_rows() {
        let store = DataStore::new();
        store.apply_readings(&snapshot(vec![("1", ok_reading(100, 20))]));
        assert_eq!(store.device_count(), 0);
    }

    #[test]
    fn routine_poll_patches_registered_rows() {
        let store = DataStore::new();
        store.resync_devices(&snapshot(vec![("1", ok_reading(100, 20))]));

        store.apply_readings(&snapshot(vec![("1", ok_reading(2500, 255))]));

        let device = store.device(DeviceId(1)).unwrap();
        assert!(device.health.is_okay());
        assert_eq!(device.telemetry.lightness.unwrap().0, 2500);
        assert_eq!(device.telemetry.led.unwrap().raw(), 255);
    }

    #[test]
    fn errored_reading_keeps_stale_telemetry() {
        let store = DataStore::new();
        store.resync_devices(&snapshot(vec![("1", ok_reading(100, 20))]));

        store.apply_readings(&snapshot(vec![("1", err_reading("unreachable"))]));

        let device = store.device(DeviceId(1)).unwrap();
        assert_eq!(device.health, DeviceHealth::Errored("unreachable".into()));
        // Telemetry from the last good poll survives.
        assert_eq!(device.telemetry.lightness.unwrap().0, 100);
    }

    #[test]
    fn removed_device_stays_gone_through_routine_polls() {
        let store = DataStore::new();
        let snap = snapshot(vec![("1", ok_reading(100, 20)), ("2", ok_reading(50, 0))]);
        store.resync_devices(&snap);
        assert_eq!(store.device_count(), 2);

        assert!(store.remove_device(DeviceId(1)));
        // The in-flight poll answers for the removed device; it must not
        // resurrect the row.
        store.apply_readings(&snap);
        assert_eq!(store.device_count(), 1);
        assert!(store.device(DeviceId(1)).is_none());
    }

    #[test]
    fn remove_device_decrements_count_exactly_once() {
        let store = DataStore::new();
        store.resync_devices(&snapshot(vec![("1", ok_reading(100, 20))]));

        assert!(store.remove_device(DeviceId(1)));
        assert_eq!(store.device_count(), 0);
        assert!(!store.remove_device(DeviceId(1)));
        assert_eq!(store.device_count(), 0);
    }

    #[test]
    fn resync_keeps_metadata_and_drops_vanished_rows() {
        let store = DataStore::new();
        store.resync_devices(&snapshot(vec![
            ("1", ok_reading(100, 20)),
            ("2", ok_reading(50, 0)),
        ]));
        assert!(store.annotate_device(DeviceId(1), "Hall lamp", "192.168.1.60", DeviceRole::Led));

        // Device 2 was deleted hub-side; device 3 appeared.
        store.resync_devices(&snapshot(vec![
            ("1", ok_reading(100, 20)),
            ("3", ok_reading(10, 0)),
        ]));

        let kept = store.device(DeviceId(1)).unwrap();
        assert_eq!(kept.name.as_deref(), Some("Hall lamp"));
        assert!(store.device(DeviceId(2)).is_none());
        assert!(store.device(DeviceId(3)).is_some());
    }

    #[test]
    fn unparseable_keys_are_skipped() {
        let store = DataStore::new();
        store.resync_devices(&snapshot(vec![
            ("1", ok_reading(100, 20)),
            ("not-a-number", ok_reading(0, 0)),
        ]));
        assert_eq!(store.device_count(), 1);
    }

    #[test]
    fn event_rows_remove_idempotently() {
        let store = DataStore::new();
        store.upsert_event(TimedEvent {
            id: EventId(5),
            device: DeviceId(1),
            kind: EventKind::RelayOn,
            time: TimedEvent::parse_time("07:30").unwrap(),
        });
        assert_eq!(store.event_count(), 1);

        assert!(store.remove_event(EventId(5)));
        assert!(!store.remove_event(EventId(5)));
        assert_eq!(store.event_count(), 0);
    }
}
