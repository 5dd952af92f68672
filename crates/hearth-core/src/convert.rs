// ── Wire → domain conversion ──
//
// The polling endpoint keys devices by stringified integers and splits
// each reading into success/error shapes. Normalize both here.

use hearth_api::models::DeviceReading;

use crate::model::{Brightness, DeviceHealth, DeviceId, Lightness, RelayState, Telemetry};

/// Parse a polling-snapshot key into a [`DeviceId`].
///
/// Unparseable keys yield `None`; the caller skips them the way the
/// dashboard skips rows it cannot match.
pub(crate) fn device_key(raw: &str) -> Option<DeviceId> {
    raw.parse().ok()
}

/// The store-level effect of one reading.
pub(crate) struct ReadingUpdate {
    pub health: DeviceHealth,
    /// `Some` only for successful readings -- an errored poll keeps the
    /// previous telemetry.
    pub telemetry: Option<Telemetry>,
}

pub(crate) fn reading_update(reading: &DeviceReading) -> ReadingUpdate {
    if reading.is_success() {
        ReadingUpdate {
            health: DeviceHealth::Okay,
            telemetry: Some(Telemetry {
                lightness: reading.lightness.map(Lightness),
                relay: reading
                    .relay_state
                    .as_deref()
                    .map(RelayState::from_wire)
                    .unwrap_or_default(),
                led: reading.led_state.map(Brightness::from_wire),
            }),
        }
    } else {
        ReadingUpdate {
            health: DeviceHealth::Errored(
                reading
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown error".into()),
            ),
            telemetry: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success_reading() -> DeviceReading {
        DeviceReading {
            result: "success".into(),
            lightness: Some(1200),
            relay_state: Some("on".into()),
            led_state: Some(128),
            error: None,
        }
    }

    #[test]
    fn keys_parse_or_skip() {
        assert_eq!(device_key("4"), Some(DeviceId(4)));
        assert_eq!(device_key("garbage"), None);
    }

    #[test]
    fn success_reading_carries_telemetry() {
        let update = reading_update(&success_reading());
        assert!(update.health.is_okay());
        let telemetry = update.telemetry.expect("success carries telemetry");
        assert_eq!(telemetry.lightness, Some(Lightness(1200)));
        assert!(telemetry.relay.is_on());
        assert_eq!(telemetry.led.map(Brightness::raw), Some(128));
    }

    #[test]
    fn error_reading_keeps_message_and_drops_telemetry() {
        let reading = DeviceReading {
            result: "error".into(),
            lightness: None,
            relay_state: None,
            led_state: None,
            error: Some("timed out".into()),
        };
        let update = reading_update(&reading);
        assert_eq!(update.health.error(), Some("timed out"));
        assert!(update.telemetry.is_none());
    }
}
