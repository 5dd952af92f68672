// Integration tests for `HubClient` using wiremock.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hearth_api::transport::TransportConfig;
use hearth_api::{Error, HubClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HubClient) {
    let server = MockServer::start().await;
    let base_url = server.uri().parse().unwrap();
    let client = HubClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Polling ─────────────────────────────────────────────────────────

#[tokio::test]
async fn devices_data_mixes_success_and_error_readings() {
    let (server, client) = setup().await;

    let body = json!({
        "1": {
            "result": "success",
            "lightness": 1500,
            "relay_state": "on",
            "led_state": 128,
        },
        "2": {
            "result": "error",
            "error": "Connection timed out",
        },
    });

    Mock::given(method("GET"))
        .and(path("/devices-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let data = client.devices_data().await.unwrap();

    assert_eq!(data.len(), 2);

    let ok = &data["1"];
    assert!(ok.is_success());
    assert_eq!(ok.lightness, Some(1500));
    assert_eq!(ok.relay_state.as_deref(), Some("on"));
    assert_eq!(ok.led_state, Some(128));
    assert_eq!(ok.error, None);

    let failed = &data["2"];
    assert!(!failed.is_success());
    assert_eq!(failed.error.as_deref(), Some("Connection timed out"));
    assert_eq!(failed.lightness, None);
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn add_device_is_form_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/add-device"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("device_name=Hall+lamp"))
        .and(body_string_contains("device_ip=192.168.1.60"))
        .and(body_string_contains("device_role=led"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Device added successfully",
        })))
        .mount(&server)
        .await;

    let envelope = client
        .add_device("Hall lamp", "192.168.1.60", "led")
        .await
        .unwrap();
    assert_eq!(envelope.message.as_deref(), Some("Device added successfully"));
}

#[tokio::test]
async fn add_device_duplicate_surfaces_hub_message() {
    let (server, client) = setup().await;

    // The hub rejects duplicates with HTTP 400 *and* an envelope body.
    Mock::given(method("POST"))
        .and(path("/add-device"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Device already exists",
        })))
        .mount(&server)
        .await;

    let err = client
        .add_device("Hall lamp", "192.168.1.60", "led")
        .await
        .unwrap_err();

    match err {
        Error::Hub { message } => assert_eq!(message, "Device already exists"),
        other => panic!("expected Error::Hub, got {other:?}"),
    }
}

#[tokio::test]
async fn set_led_transmits_brightness_as_string() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/set-led"))
        .and(body_json(json!({
            "device_id": 7,
            "brightness": "128",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "LED 7 set to 128",
        })))
        .mount(&server)
        .await;

    client.set_led(7, 128).await.unwrap();
}

#[tokio::test]
async fn set_device_position_sends_rounded_coordinates() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/set-device-position"))
        .and(body_json(json!({
            "device_id": 3,
            "coord_x": 400,
            "coord_y": 120,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Device moved successfully",
        })))
        .mount(&server)
        .await;

    client.set_device_position(3, 400, 120).await.unwrap();
}

#[tokio::test]
async fn remove_device_unknown_id_is_a_hub_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/remove-device"))
        .and(body_json(json!({ "device_id": 99 })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "message": "Device not found",
        })))
        .mount(&server)
        .await;

    let err = client.remove_device(99).await.unwrap_err();
    match err {
        Error::Hub { message } => assert_eq!(message, "Device not found"),
        other => panic!("expected Error::Hub, got {other:?}"),
    }
}

#[tokio::test]
async fn toggle_relay_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/toggle-relay"))
        .and(body_json(json!({ "device_id": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Relay 4 toggled",
        })))
        .mount(&server)
        .await;

    let envelope = client.toggle_relay(4).await.unwrap();
    assert!(envelope.is_success());
}

// ── Timed events ────────────────────────────────────────────────────

#[tokio::test]
async fn remove_event_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/remove-event"))
        .and(body_json(json!({ "event_id": 12 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Event removed successfully",
        })))
        .mount(&server)
        .await;

    client.remove_event(12).await.unwrap();
}

#[tokio::test]
async fn add_timed_event_accepts_redirect_response() {
    let (server, client) = setup().await;

    // The hub answers this form endpoint with a redirect, not an envelope.
    Mock::given(method("POST"))
        .and(path("/add-timed-event"))
        .and(body_string_contains("device_id=5"))
        .and(body_string_contains("event_type=relay-on"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.add_timed_event(5, "relay-on", "07:30").await.unwrap();
}

// ── Map background ──────────────────────────────────────────────────

#[tokio::test]
async fn map_background_missing_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/map-background"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(client.map_background().await.unwrap().is_none());
}

#[tokio::test]
async fn map_background_returns_bytes_and_content_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/map-background"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .mount(&server)
        .await;

    let image = client.map_background().await.unwrap().unwrap();
    assert_eq!(image.content_type.as_deref(), Some("image/png"));
    assert_eq!(image.bytes.len(), 4);
}
