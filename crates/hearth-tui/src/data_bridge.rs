//! Data bridge — connects [`Hub`] streams to TUI actions.
//!
//! Runs as a background task: subscribes to entity streams, connection
//! state, and the auto-update gate, forwarding every change as an
//! [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use hearth_core::{ConnectionState, Hub};

use crate::action::Action;

/// Spawn the data bridge connecting [`Hub`] reactive streams to the TUI.
///
/// Connects to the hub, pushes initial snapshots, then loops forwarding
/// every entity change and state transition as an [`Action`]. Shuts down
/// cleanly on cancellation.
pub async fn spawn_data_bridge(
    hub: Hub,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::Connecting);

    if let Err(e) = hub.connect().await {
        warn!(error = %e, "failed to connect to hub");
        let _ = action_tx.send(Action::Disconnected(format!("{e}")));
        return;
    }

    let _ = action_tx.send(Action::Connected);

    // Subscribe to entity streams
    let mut devices = hub.devices();
    let mut events = hub.events();
    let mut conn_state = hub.connection_state();
    let mut auto_update = hub.auto_update();

    // Push initial snapshots so screens have data immediately
    let _ = action_tx.send(Action::DevicesUpdated(devices.current().clone()));
    let _ = action_tx.send(Action::EventsUpdated(events.current().clone()));
    let _ = action_tx.send(Action::AutoUpdateChanged(hub.auto_update_enabled()));

    // Stream loop — forward every change until cancelled
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(d) = devices.changed() => {
                let _ = action_tx.send(Action::DevicesUpdated(d));
            }
            Some(e) = events.changed() => {
                let _ = action_tx.send(Action::EventsUpdated(e));
            }
            Ok(()) = auto_update.changed() => {
                let enabled = *auto_update.borrow_and_update();
                let _ = action_tx.send(Action::AutoUpdateChanged(enabled));
            }
            Ok(()) = conn_state.changed() => {
                let state = conn_state.borrow_and_update().clone();
                match state {
                    ConnectionState::Connected => {
                        let _ = action_tx.send(Action::Connected);
                    }
                    ConnectionState::Disconnected => {
                        let _ = action_tx.send(Action::Disconnected("disconnected".into()));
                    }
                    ConnectionState::Failed => {
                        let _ = action_tx.send(Action::Disconnected("connection failed".into()));
                    }
                    ConnectionState::Connecting => {}
                }
            }
        }
    }

    hub.disconnect().await;
    debug!("data bridge shut down");
}
