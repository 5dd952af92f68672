// Hub API wire types
//
// Models for the hub's JSON responses. Command endpoints all answer with
// the `{status, message}` envelope; the polling endpoint returns a map of
// per-device readings. Fields use `#[serde(default)]` liberally because the
// hub omits fields depending on the outcome (a success reading has no
// `error`, an error reading has no telemetry).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard hub command response envelope.
///
/// Every command endpoint wraps its outcome:
/// ```json
/// { "status": "success", "message": "Device added successfully" }
/// ```
/// The envelope is returned on error statuses (400/500) too, carrying the
/// hub's human-readable message.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusEnvelope {
    /// `true` when the hub reported success.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ── Device readings ──────────────────────────────────────────────────

/// One device's live reading from `GET /devices-data`.
///
/// `result == "success"` carries telemetry; anything else carries `error`
/// and leaves the telemetry fields absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceReading {
    pub result: String,
    /// Ambient light sensor value (raw, unbucketed).
    #[serde(default)]
    pub lightness: Option<i64>,
    /// Relay state as reported by the device, e.g. `"on"` / `"off"`.
    #[serde(default)]
    pub relay_state: Option<String>,
    /// LED output level on the device's 0-255 scale.
    #[serde(default)]
    pub led_state: Option<i64>,
    /// Failure description when `result != "success"`.
    #[serde(default)]
    pub error: Option<String>,
}

impl DeviceReading {
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }
}

/// The full polling snapshot: device id (stringified integer, as JSON
/// object keys always are) to reading.
pub type DevicesData = HashMap<String, DeviceReading>;

// ── Map background ───────────────────────────────────────────────────

/// Raw map background image as served by `GET /map-background`.
#[derive(Debug, Clone)]
pub struct MapImage {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
