// Device endpoints
//
// Polling via /devices-data plus the per-device command endpoints:
// add, remove, reposition, relay toggle, and LED level.

use serde_json::json;
use tracing::debug;

use crate::client::HubClient;
use crate::error::Error;
use crate::models::{DevicesData, StatusEnvelope};

impl HubClient {
    /// Fetch the live reading of every registered device.
    ///
    /// `GET /devices-data`
    ///
    /// Keys are stringified integer device ids; unparseable keys are the
    /// caller's problem (the domain layer skips them).
    pub async fn devices_data(&self) -> Result<DevicesData, Error> {
        let url = self.endpoint("devices-data")?;
        debug!("fetching device readings");
        self.get_json(url).await
    }

    /// Register a new device on the hub.
    ///
    /// `POST /add-device` (form-encoded). The hub rejects duplicate IPs
    /// with `{status: "error", message: "Device already exists"}`.
    pub async fn add_device(
        &self,
        name: &str,
        ip: &str,
        role: &str,
    ) -> Result<StatusEnvelope, Error> {
        let url = self.endpoint("add-device")?;
        debug!(name, ip, role, "adding device");
        self.post_form(
            url,
            &[
                ("device_name", name),
                ("device_ip", ip),
                ("device_role", role),
            ],
        )
        .await
    }

    /// Remove a device from the hub.
    ///
    /// `POST /remove-device`
    pub async fn remove_device(&self, device_id: i64) -> Result<StatusEnvelope, Error> {
        let url = self.endpoint("remove-device")?;
        debug!(device_id, "removing device");
        self.post_command(url, &json!({ "device_id": device_id }))
            .await
    }

    /// Persist a device's map position.
    ///
    /// `POST /set-device-position` -- coordinates are whole pixels, already
    /// rounded by the caller.
    pub async fn set_device_position(
        &self,
        device_id: i64,
        coord_x: i64,
        coord_y: i64,
    ) -> Result<StatusEnvelope, Error> {
        let url = self.endpoint("set-device-position")?;
        debug!(device_id, coord_x, coord_y, "moving device");
        self.post_command(
            url,
            &json!({
                "device_id": device_id,
                "coord_x": coord_x,
                "coord_y": coord_y,
            }),
        )
        .await
    }

    /// Flip a device's relay output.
    ///
    /// `POST /toggle-relay` -- the hub reads the current state off the
    /// device and writes the opposite; the next poll reflects it.
    pub async fn toggle_relay(&self, device_id: i64) -> Result<StatusEnvelope, Error> {
        let url = self.endpoint("toggle-relay")?;
        debug!(device_id, "toggling relay");
        self.post_command(url, &json!({ "device_id": device_id }))
            .await
    }

    /// Set a device's LED level.
    ///
    /// `POST /set-led`. `brightness` is on the hub's 0-255 scale and is
    /// transmitted as a decimal string -- that is what the hub's parser
    /// expects on the wire.
    pub async fn set_led(&self, device_id: i64, brightness: u8) -> Result<StatusEnvelope, Error> {
        let url = self.endpoint("set-led")?;
        debug!(device_id, brightness, "setting LED level");
        self.post_command(
            url,
            &json!({
                "device_id": device_id,
                "brightness": brightness.to_string(),
            }),
        )
        .await
    }
}
