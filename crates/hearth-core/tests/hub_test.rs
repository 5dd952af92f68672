// Integration tests for the `Hub` lifecycle against a mock hub.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hearth_core::{Command, CoreError, DeviceId, DeviceRole, Hub, HubConfig};

fn config(server: &MockServer) -> HubConfig {
    let mut cfg = HubConfig::new(server.uri().parse().unwrap());
    // Tests drive refreshes by hand.
    cfg.poll_interval = Duration::ZERO;
    cfg
}

async fn mount_devices_data(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/devices-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn ok_body() -> serde_json::Value {
    json!({
        "1": { "result": "success", "lightness": 1500, "relay_state": "on", "led_state": 128 },
        "2": { "result": "error", "error": "unreachable" },
    })
}

#[tokio::test]
async fn connect_registers_devices_from_snapshot() {
    let server = MockServer::start().await;
    mount_devices_data(&server, ok_body()).await;

    let hub = Hub::new(config(&server));
    hub.connect().await.unwrap();

    let devices = hub.devices_snapshot();
    assert_eq!(devices.len(), 2);
    assert!(devices[0].health.is_okay());
    assert_eq!(devices[1].health.error(), Some("unreachable"));

    hub.disconnect().await;
}

#[tokio::test]
async fn connect_failure_reports_connection_error() {
    let server = MockServer::start().await;
    // No /devices-data mock: wiremock answers 404, which surfaces as an
    // API error rather than a panic.
    let hub = Hub::new(config(&server));
    assert!(hub.connect().await.is_err());
}

#[tokio::test]
async fn remove_device_drops_the_row() {
    let server = MockServer::start().await;
    mount_devices_data(&server, ok_body()).await;
    Mock::given(method("POST"))
        .and(path("/remove-device"))
        .and(body_json(json!({ "device_id": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "message": "Device removed successfully",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let hub = Hub::new(config(&server));
    hub.connect().await.unwrap();

    hub.execute(Command::RemoveDevice { id: DeviceId(1) })
        .await
        .unwrap();

    assert_eq!(hub.store().device_count(), 1);
    assert!(hub.store().device(DeviceId(1)).is_none());

    hub.disconnect().await;
}

#[tokio::test]
async fn add_device_annotates_the_new_row() {
    let server = MockServer::start().await;

    // First snapshot (connect) knows devices 1 and 2; after the add the
    // hub reports a third id.
    mount_devices_data(&server, ok_body()).await;

    let hub = Hub::new(config(&server));
    hub.connect().await.unwrap();

    server.reset().await;
    let mut grown = ok_body();
    grown["3"] = json!({ "result": "error", "error": "not polled yet" });
    mount_devices_data(&server, grown).await;
    Mock::given(method("POST"))
        .and(path("/add-device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "message": "Device added successfully",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = hub
        .execute(Command::AddDevice {
            name: "Hall lamp".into(),
            ip: "192.168.1.60".into(),
            role: DeviceRole::Led,
        })
        .await
        .unwrap();
    assert_eq!(result.message(), Some("Device added successfully"));

    let added = hub.store().device(DeviceId(3)).unwrap();
    assert_eq!(added.name.as_deref(), Some("Hall lamp"));
    assert_eq!(added.role, Some(DeviceRole::Led));

    hub.disconnect().await;
}

#[tokio::test]
async fn set_led_rejection_surfaces_as_typed_error() {
    let server = MockServer::start().await;
    mount_devices_data(&server, ok_body()).await;
    Mock::given(method("POST"))
        .and(path("/set-led"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error", "message": "Failed to set LED state: timeout",
        })))
        .mount(&server)
        .await;

    let hub = Hub::new(config(&server));
    hub.connect().await.unwrap();

    let err = hub
        .execute(Command::SetLed {
            id: DeviceId(1),
            brightness: hearth_core::Brightness::from_percent(50).unwrap(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Rejected { .. }));

    hub.disconnect().await;
}

#[tokio::test]
async fn refresh_patches_without_registering() {
    let server = MockServer::start().await;
    mount_devices_data(&server, ok_body()).await;

    let hub = Hub::new(config(&server));
    hub.connect().await.unwrap();
    assert_eq!(hub.store().device_count(), 2);

    // A new id shows up in routine polls only -- it must not be
    // registered until the next resync.
    server.reset().await;
    let mut grown = ok_body();
    grown["9"] = json!({ "result": "success", "lightness": 5, "relay_state": "off", "led_state": 0 });
    mount_devices_data(&server, grown).await;

    hub.refresh().await.unwrap();
    assert_eq!(hub.store().device_count(), 2);

    hub.resync().await.unwrap();
    assert_eq!(hub.store().device_count(), 3);

    hub.disconnect().await;
}

#[tokio::test]
async fn scheduled_events_get_provisional_rows() {
    let server = MockServer::start().await;
    mount_devices_data(&server, ok_body()).await;
    Mock::given(method("POST"))
        .and(path("/add-timed-event"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let hub = Hub::new(config(&server));
    hub.connect().await.unwrap();

    hub.execute(Command::AddTimedEvent {
        device: DeviceId(1),
        kind: hearth_core::EventKind::RelayOn,
        time: hearth_core::TimedEvent::parse_time("07:30").unwrap(),
    })
    .await
    .unwrap();

    let events = hub.events_snapshot();
    assert_eq!(events.len(), 1);
    assert!(events[0].id.is_provisional());

    // Scheduling against an unknown device is refused before any request.
    let err = hub
        .execute(Command::AddTimedEvent {
            device: DeviceId(42),
            kind: hearth_core::EventKind::RelayOn,
            time: hearth_core::TimedEvent::parse_time("07:30").unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::DeviceNotFound { .. }));

    hub.disconnect().await;
}
