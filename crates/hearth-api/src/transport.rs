// HTTP transport configuration
//
// The hub speaks plain unauthenticated HTTP on the local network, so the
// only knob that matters is the request timeout. Kept as a struct so the
// client constructor signature survives future additions.

use std::time::Duration;

use crate::error::Error;

/// Transport-level settings applied to the underlying `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. The hub proxies each command to the device
    /// itself with a 2s inner timeout, so anything above ~5s means the
    /// hub is gone, not slow.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this configuration.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(Error::Transport)?;
        Ok(client)
    }
}
