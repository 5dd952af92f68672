//! All possible UI actions. Actions are the sole mechanism for state
//! mutation.

use std::sync::Arc;

use hearth_core::{Command, Device, TimedEvent};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification shown in the status bar.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    #[allow(dead_code)]
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Data Events (from hearth-core streams) ────────────────────
    DevicesUpdated(Arc<Vec<Arc<Device>>>),
    EventsUpdated(Arc<Vec<Arc<TimedEvent>>>),

    // ── Connection Status ─────────────────────────────────────────
    Connected,
    Connecting,
    Disconnected(String),

    // ── Auto-update gate ──────────────────────────────────────────
    ToggleAutoUpdate,
    AutoUpdateChanged(bool),

    // ── Hub commands ──────────────────────────────────────────────
    /// Execute a core command against the hub; the outcome comes back
    /// as a `Notify` action (every failure is surfaced, none are
    /// fire-and-forget).
    Dispatch(Command),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}
