//! Shared helpers for command handlers.

use std::sync::Arc;

use hearth_core::{Device, DeviceRole, EventKind, Hub};

use crate::cli::{EventKindArg, RoleArg};
use crate::error::CliError;

/// Resolve a device by id or (case-insensitive) name.
pub fn find_device(hub: &Hub, needle: &str) -> Result<Arc<Device>, CliError> {
    let snap = hub.devices_snapshot();

    let by_id = needle
        .parse()
        .ok()
        .and_then(|id: hearth_core::DeviceId| snap.iter().find(|d| d.id == id).cloned());
    if let Some(device) = by_id {
        return Ok(device);
    }

    snap.iter()
        .find(|d| {
            d.name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(needle))
        })
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "device".into(),
            identifier: needle.to_owned(),
            list_command: "devices list".into(),
        })
}

pub fn role_from_arg(role: RoleArg) -> DeviceRole {
    match role {
        RoleArg::Mixed => DeviceRole::Mixed,
        RoleArg::Led => DeviceRole::Led,
        RoleArg::Relay => DeviceRole::Relay,
        RoleArg::Sensor => DeviceRole::Sensor,
    }
}

pub fn kind_from_arg(kind: EventKindArg) -> EventKind {
    match kind {
        EventKindArg::RelayOn => EventKind::RelayOn,
        EventKindArg::RelayOff => EventKind::RelayOff,
        EventKindArg::RelayToggle => EventKind::RelayToggle,
        EventKindArg::LedOn => EventKind::LedOn,
        EventKindArg::LedOff => EventKind::LedOff,
        EventKindArg::LedToggle => EventKind::LedToggle,
    }
}
