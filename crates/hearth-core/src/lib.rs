// hearth-core: Reactive data layer between hearth-api and consumers (CLI/TUI).

pub mod command;
pub mod config;
pub mod error;
pub mod hub;
pub mod model;
pub mod store;
pub mod stream;

mod convert;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::HubConfig;
pub use error::CoreError;
pub use hub::{ConnectionState, Hub};
pub use store::DataStore;
pub use stream::EntityStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Brightness, Device, DeviceHealth, DeviceId, DeviceRole, EventId, EventKind, Lightness,
    LightnessLevel, MapBounds, Position, RelayState, Telemetry, TimedEvent,
};
