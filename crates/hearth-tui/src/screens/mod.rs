//! Screen registry.

mod add_device;
mod devices;
mod events;
mod map;

use hearth_core::MapBounds;

use crate::component::Component;
use crate::screen::ScreenId;

pub use add_device::AddDeviceScreen;
pub use devices::DevicesScreen;
pub use events::EventsScreen;
pub use map::MapScreen;

/// Build all screens in registry order.
pub fn create_screens(bounds: MapBounds) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Map, Box::new(MapScreen::new(bounds))),
        (ScreenId::Devices, Box::new(DevicesScreen::new())),
        (ScreenId::Events, Box::new(EventsScreen::new())),
        (ScreenId::AddDevice, Box::new(AddDeviceScreen::new())),
    ]
}
