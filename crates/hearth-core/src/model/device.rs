// ── Device domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::brightness::Brightness;
use super::lightness::Lightness;
use super::position::Position;

// ── DeviceId ────────────────────────────────────────────────────────

/// Canonical device identifier -- the hub's autoincrement row id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeviceId(pub i64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for DeviceId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

// ── DeviceRole ──────────────────────────────────────────────────────

/// What a device can do, as declared when it was registered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceRole {
    /// Sensor + relay + LED in one package.
    Mixed,
    Led,
    Relay,
    Sensor,
}

impl DeviceRole {
    /// Icon name for this role, matching the hub dashboard's icon table.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Mixed => "lightbulb",
            Self::Led => "chart-simple",
            Self::Relay => "shuffle",
            Self::Sensor => "arrow-up-right-dots",
        }
    }
}

// ── RelayState ──────────────────────────────────────────────────────

/// Binary relay output state. Parsed leniently -- the device firmware
/// reports free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RelayState {
    On,
    Off,
    #[default]
    Unknown,
}

impl RelayState {
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "on" => Self::On,
            "off" => Self::Off,
            _ => Self::Unknown,
        }
    }

    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => "?",
        })
    }
}

// ── Health & telemetry ──────────────────────────────────────────────

/// Whether the hub could reach the device on the last poll.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceHealth {
    /// Not polled yet.
    #[default]
    Unknown,
    /// Last poll succeeded.
    Okay,
    /// Last poll failed; carries the hub's error message.
    Errored(String),
}

impl DeviceHealth {
    pub fn is_okay(&self) -> bool {
        matches!(self, Self::Okay)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Errored(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Live sensor/output readings from the most recent successful poll.
///
/// An errored poll leaves the previous telemetry in place -- stale values
/// beat a blank row, and the health field says how stale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Telemetry {
    pub lightness: Option<Lightness>,
    pub relay: RelayState,
    pub led: Option<Brightness>,
}

// ── Device ──────────────────────────────────────────────────────────

/// The canonical device row.
///
/// Metadata (name, ip, role) is only known for devices registered through
/// this client -- the hub's polling endpoint reports ids and telemetry
/// only, so discovered devices carry `None` until annotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: Option<String>,
    pub ip: Option<String>,
    pub role: Option<DeviceRole>,
    /// Map position in logical pixels; `None` until placed.
    pub position: Option<Position>,
    pub health: DeviceHealth,
    pub telemetry: Telemetry,
    pub last_update: Option<DateTime<Utc>>,
}

impl Device {
    /// A bare row for a device discovered from the polling snapshot.
    pub fn discovered(id: DeviceId) -> Self {
        Self {
            id,
            name: None,
            ip: None,
            role: None,
            position: None,
            health: DeviceHealth::Unknown,
            telemetry: Telemetry::default(),
            last_update: None,
        }
    }

    /// Display name: the registered name, or a placeholder from the id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("device {}", self.id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn device_id_parses_from_string_keys() {
        let id: DeviceId = "17".parse().unwrap();
        assert_eq!(id, DeviceId(17));
        assert!("x17".parse::<DeviceId>().is_err());
    }

    #[test]
    fn role_wire_strings_round_trip() {
        assert_eq!("relay".parse::<DeviceRole>().unwrap(), DeviceRole::Relay);
        assert_eq!(DeviceRole::Sensor.to_string(), "sensor");
        assert!("toaster".parse::<DeviceRole>().is_err());
    }

    #[test]
    fn relay_state_is_lenient() {
        assert_eq!(RelayState::from_wire("on"), RelayState::On);
        assert_eq!(RelayState::from_wire(" OFF "), RelayState::Off);
        assert_eq!(RelayState::from_wire("57"), RelayState::Unknown);
    }

    #[test]
    fn discovered_device_has_placeholder_name() {
        let dev = Device::discovered(DeviceId(3));
        assert_eq!(dev.display_name(), "device 3");
        assert_eq!(dev.health, DeviceHealth::Unknown);
    }
}
