// ── Hub connection configuration ──

use std::time::Duration;

use url::Url;

use crate::model::MapBounds;

/// Everything the [`Hub`](crate::Hub) needs to talk to a hub instance.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Hub base URL (e.g. `http://192.168.1.50`).
    pub url: Url,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Status poll period. `0` disables the poller entirely (the CLI's
    /// one-shot path); the dashboard default is 3 seconds.
    pub poll_interval: Duration,

    /// Initial state of the auto-update gate. The poller keeps ticking
    /// while this is off -- it just skips the fetch.
    pub auto_update: bool,

    /// Logical dimensions of the dashboard map.
    pub map: MapBounds,
}

impl HubConfig {
    /// Dashboard defaults for the given hub URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_secs(3),
            auto_update: true,
            map: MapBounds::default(),
        }
    }
}
