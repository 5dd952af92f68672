// ── Domain model ──
//
// Typed view of the hub's entities. Wire-level looseness (stringified
// ids, free-form relay strings, 0-255 LED levels) is normalized here so
// consumers never touch raw payload shapes.

mod brightness;
mod device;
mod event;
mod lightness;
mod position;

pub use brightness::Brightness;
pub use device::{Device, DeviceHealth, DeviceId, DeviceRole, RelayState, Telemetry};
pub use event::{EventId, EventKind, TimedEvent};
pub use lightness::{Lightness, LightnessLevel};
pub use position::{MapBounds, Position};
