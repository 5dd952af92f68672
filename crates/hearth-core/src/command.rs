// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The hub
// handle routes each variant to the matching HTTP call and applies the
// optimistic local effect on success.

use chrono::NaiveTime;

use crate::error::CoreError;
use crate::model::{Brightness, DeviceId, DeviceRole, EventId, EventKind, Position};

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All possible write operations against the hub.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Device operations ────────────────────────────────────────────
    /// Register a new device; the hub rejects duplicate IPs.
    AddDevice {
        name: String,
        ip: String,
        role: DeviceRole,
    },
    RemoveDevice {
        id: DeviceId,
    },
    /// Persist a map position (already clamped by the drag session).
    SetPosition {
        id: DeviceId,
        position: Position,
    },
    /// Flip the relay; the next poll reflects the new state.
    ToggleRelay {
        id: DeviceId,
    },
    /// Set the LED level; the next poll reflects the new state.
    SetLed {
        id: DeviceId,
        brightness: Brightness,
    },

    // ── Timed events ─────────────────────────────────────────────────
    RemoveEvent {
        id: EventId,
    },
    AddTimedEvent {
        device: DeviceId,
        kind: EventKind,
        time: NaiveTime,
    },
}

/// Result of a successfully executed command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Ok,
    /// Success with a hub-provided message worth showing.
    Message(String),
}

impl CommandResult {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::Message(msg) => Some(msg),
        }
    }
}
