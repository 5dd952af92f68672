// ── Timed event domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::device::DeviceId;

// ── EventId ─────────────────────────────────────────────────────────

/// Timed event identifier.
///
/// Non-negative ids are hub row ids. Negative ids are provisional: the
/// hub assigns ids on insert but never reports them back, so events
/// scheduled through this client get a client-side id until the hub's
/// own id becomes known (it never does over this API -- see DESIGN.md).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    /// `true` for client-assigned ids with no hub-side counterpart.
    pub fn is_provisional(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_provisional() {
            write!(f, "local-{}", -self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

// ── EventKind ───────────────────────────────────────────────────────

/// What a timed event does when its minute comes around.
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
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    RelayOn,
    RelayOff,
    RelayToggle,
    LedOn,
    LedOff,
    LedToggle,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::RelayOn => "Switch relay on",
            Self::RelayOff => "Switch relay off",
            Self::RelayToggle => "Toggle relay",
            Self::LedOn => "Switch LED on",
            Self::LedOff => "Switch LED off",
            Self::LedToggle => "Toggle LED",
        }
    }
}

// ── TimedEvent ──────────────────────────────────────────────────────

/// A scheduled action: at `time` (hub-local, HH:MM), apply `kind` to
/// `device`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedEvent {
    pub id: EventId,
    pub device: DeviceId,
    pub kind: EventKind,
    pub time: NaiveTime,
}

impl TimedEvent {
    /// The hub's wire format for event times.
    pub fn wire_time(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Parse the hub's HH:MM time format.
    pub fn parse_time(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_strings_round_trip() {
        assert_eq!(EventKind::RelayOn.to_string(), "relay-on");
        assert_eq!("led-toggle".parse::<EventKind>().unwrap(), EventKind::LedToggle);
        assert!("relay-explode".parse::<EventKind>().is_err());
    }

    #[test]
    fn provisional_ids_display_distinctly() {
        assert_eq!(EventId(7).to_string(), "7");
        assert_eq!(EventId(-2).to_string(), "local-2");
        assert!(EventId(-2).is_provisional());
        assert!(!EventId(0).is_provisional());
    }

    #[test]
    fn time_parses_and_formats_hh_mm() {
        let t = TimedEvent::parse_time("07:30").unwrap();
        let event = TimedEvent {
            id: EventId(1),
            device: DeviceId(1),
            kind: EventKind::LedOn,
            time: t,
        };
        assert_eq!(event.wire_time(), "07:30");
        assert!(TimedEvent::parse_time("25:99").is_none());
    }
}
