// ── Hub abstraction ──
//
// Full lifecycle management for a hub connection: initial device
// registration, the background status poller, command routing, and
// reactive data streaming through the DataStore.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use hearth_api::HubClient;
use hearth_api::models::MapImage;
use hearth_api::transport::TransportConfig;

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::HubConfig;
use crate::error::CoreError;
use crate::model::{Device, DeviceId, EventId, TimedEvent};
use crate::store::DataStore;
use crate::stream::EntityStream;

const COMMAND_CHANNEL_SIZE: usize = 64;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Hub ──────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<HubInner>`. Manages the connection
/// lifecycle: initial device registration, the background status poller,
/// command routing, and reactive entity streaming.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

struct HubInner {
    config: HubConfig,
    store: Arc<DataStore>,
    connection_state: watch::Sender<ConnectionState>,
    /// The auto-update gate: the poller ticks regardless but only
    /// fetches while this is `true`.
    auto_update: watch::Sender<bool>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    client: Mutex<Option<HubClient>>,
    /// Source of provisional ids for events scheduled this session.
    event_seq: AtomicI64,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Hub {
    /// Create a new Hub handle from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to load data and start
    /// background tasks.
    pub fn new(config: HubConfig) -> Self {
        let store = Arc::new(DataStore::new());
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (auto_update, _) = watch::channel(config.auto_update);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();

        Self {
            inner: Arc::new(HubInner {
                config,
                store,
                connection_state,
                auto_update,
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                client: Mutex::new(None),
                event_seq: AtomicI64::new(0),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Access the hub configuration.
    pub fn config(&self) -> &HubConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the hub.
    ///
    /// Performs the initial device registration from a polling snapshot,
    /// then spawns background tasks (status poller, command processor).
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        let config = &self.inner.config;
        let transport = TransportConfig {
            timeout: config.timeout,
        };

        let client = match HubClient::new(config.url.clone(), &transport) {
            Ok(client) => client,
            Err(e) => {
                let _ = self.inner.connection_state.send(ConnectionState::Failed);
                return Err(e.into());
            }
        };

        // Initial load: the only way to learn which devices exist.
        let data = match client.devices_data().await {
            Ok(data) => data,
            Err(e) => {
                let _ = self.inner.connection_state.send(ConnectionState::Failed);
                return Err(e.into());
            }
        };
        self.inner.store.resync_devices(&data);

        *self.inner.client.lock().await = Some(client);

        // Spawn background tasks
        let mut handles = self.inner.task_handles.lock().await;

        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let hub = self.clone();
            handles.push(tokio::spawn(command_processor_task(hub, rx)));
        }

        if !config.poll_interval.is_zero() {
            let hub = self.clone();
            let cancel = self.inner.cancel.clone();
            handles.push(tokio::spawn(poll_task(hub, cancel)));
        }

        let _ = self.inner.connection_state.send(ConnectionState::Connected);
        info!(devices = self.inner.store.device_count(), "connected to hub");
        Ok(())
    }

    /// Disconnect from the hub: cancel background tasks and reset the
    /// connection state to [`Disconnected`](ConnectionState::Disconnected).
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        *self.inner.client.lock().await = None;
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    /// Fetch a polling snapshot and patch it onto registered rows.
    ///
    /// Routine refresh: unknown device ids are skipped, never registered.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let client_guard = self.inner.client.lock().await;
        let client = client_guard.as_ref().ok_or(CoreError::HubDisconnected)?;

        let data = client.devices_data().await?;
        drop(client_guard);

        self.inner.store.apply_readings(&data);
        trace!(devices = self.inner.store.device_count(), "poll applied");
        Ok(())
    }

    /// Fetch a polling snapshot and re-register the device set from it.
    pub async fn resync(&self) -> Result<(), CoreError> {
        let client_guard = self.inner.client.lock().await;
        let client = client_guard.as_ref().ok_or(CoreError::HubDisconnected)?;

        let data = client.devices_data().await?;
        drop(client_guard);

        self.inner.store.resync_devices(&data);
        debug!(devices = self.inner.store.device_count(), "resync complete");
        Ok(())
    }

    /// Download the dashboard's map background image, if one is set.
    pub async fn fetch_map_background(&self) -> Result<Option<MapImage>, CoreError> {
        let client_guard = self.inner.client.lock().await;
        let client = client_guard.as_ref().ok_or(CoreError::HubDisconnected)?;
        Ok(client.map_background().await?)
    }

    // ── Auto-update gate ─────────────────────────────────────────

    /// Flip the auto-update gate on or off.
    pub fn set_auto_update(&self, enabled: bool) {
        let _ = self.inner.auto_update.send(enabled);
    }

    /// Current state of the auto-update gate.
    pub fn auto_update_enabled(&self) -> bool {
        *self.inner.auto_update.borrow()
    }

    /// Subscribe to auto-update gate changes.
    pub fn auto_update(&self) -> watch::Receiver<bool> {
        self.inner.auto_update.subscribe()
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against the hub.
    ///
    /// Sends the command through the internal channel to the command
    /// processor task and awaits the result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if *self.inner.connection_state.borrow() != ConnectionState::Connected {
            return Err(CoreError::HubDisconnected);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();

        self.inner
            .command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::HubDisconnected)?;

        rx.await.map_err(|_| CoreError::HubDisconnected)?
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, disconnect.
    ///
    /// Optimized for the CLI: polling is disabled since a single
    /// request-response cycle is all that is needed.
    pub async fn oneshot<F, Fut, T>(config: HubConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Hub) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.poll_interval = std::time::Duration::ZERO;

        let hub = Hub::new(cfg);
        hub.connect().await?;
        let result = f(hub.clone()).await;
        hub.disconnect().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    // ── Snapshot accessors (delegate to DataStore) ───────────────

    pub fn devices_snapshot(&self) -> Arc<Vec<Arc<Device>>> {
        self.inner.store.devices_snapshot()
    }

    pub fn events_snapshot(&self) -> Arc<Vec<Arc<TimedEvent>>> {
        self.inner.store.events_snapshot()
    }

    // ── Stream accessors (delegate to DataStore) ─────────────────

    pub fn devices(&self) -> EntityStream<Device> {
        self.inner.store.subscribe_devices()
    }

    pub fn events(&self) -> EntityStream<TimedEvent> {
        self.inner.store.subscribe_events()
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically poll device readings while the auto-update gate is open.
///
/// Each tick awaits the previous fetch, so polls can never overlap even
/// when the hub is slower than the interval.
async fn poll_task(hub: Hub, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(hub.inner.config.poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if !hub.auto_update_enabled() {
                    continue;
                }
                if let Err(e) = hub.refresh().await {
                    warn!(error = %e, "status poll failed");
                }
            }
        }
    }
}

/// Process commands from the mpsc channel, routing each to the
/// appropriate hub API call.
async fn command_processor_task(hub: Hub, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = hub.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&hub, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

/// Route a command to the appropriate hub API call and apply its local
/// effect on success.
async fn route_command(hub: &Hub, cmd: Command) -> Result<CommandResult, CoreError> {
    let client_guard = hub.inner.client.lock().await;
    let client = client_guard.as_ref().ok_or(CoreError::HubDisconnected)?;
    let store = &hub.inner.store;

    match cmd {
        // ── Device operations ────────────────────────────────────

        Command::AddDevice { name, ip, role } => {
            let envelope = client.add_device(&name, &ip, &role.to_string()).await?;

            // The hub never reports the new row's id: resync and diff the
            // id set to find it, then attach the metadata we just sent.
            let before = hub.inner.store.devices.ids();
            let data = client.devices_data().await?;
            store.resync_devices(&data);
            let new_ids: Vec<DeviceId> = store
                .devices
                .ids()
                .into_iter()
                .filter(|id| !before.contains(id))
                .collect();
            if let [id] = new_ids[..] {
                store.annotate_device(id, &name, &ip, role);
            }

            Ok(envelope
                .message
                .map_or(CommandResult::Ok, CommandResult::Message))
        }

        Command::RemoveDevice { id } => {
            client.remove_device(id.0).await?;
            store.remove_device(id);
            Ok(CommandResult::Ok)
        }

        Command::SetPosition { id, position } => {
            let (x, y) = position.rounded();
            client.set_device_position(id.0, x, y).await?;
            store.set_device_position(id, position);
            Ok(CommandResult::Ok)
        }

        Command::ToggleRelay { id } => {
            client.toggle_relay(id.0).await?;
            Ok(CommandResult::Ok)
        }

        Command::SetLed { id, brightness } => {
            client.set_led(id.0, brightness.raw()).await?;
            Ok(CommandResult::Ok)
        }

        // ── Timed events ─────────────────────────────────────────

        Command::RemoveEvent { id } => {
            if id.is_provisional() {
                // Never reached the hub's id space; local row only.
                if !store.remove_event(id) {
                    return Err(CoreError::EventNotFound { id });
                }
                return Ok(CommandResult::Ok);
            }
            client.remove_event(id.0).await?;
            store.remove_event(id);
            Ok(CommandResult::Ok)
        }

        Command::AddTimedEvent { device, kind, time } => {
            if store.device(device).is_none() {
                return Err(CoreError::DeviceNotFound { id: device });
            }

            let wire_time = time.format("%H:%M").to_string();
            client
                .add_timed_event(device.0, &kind.to_string(), &wire_time)
                .await?;

            // Hub ids are write-only; track the row under a provisional id.
            let seq = hub.inner.event_seq.fetch_add(1, Ordering::Relaxed) + 1;
            store.upsert_event(TimedEvent {
                id: EventId(-seq),
                device,
                kind,
                time,
            });
            Ok(CommandResult::Ok)
        }
    }
}
