// Timed-event endpoints
//
// Scheduled actions ("at HH:MM, switch the relay on") live hub-side;
// this layer can create and delete them.

use serde_json::json;
use tracing::debug;

use crate::client::HubClient;
use crate::error::Error;
use crate::models::StatusEnvelope;

impl HubClient {
    /// Delete a timed event.
    ///
    /// `POST /remove-event`
    pub async fn remove_event(&self, event_id: i64) -> Result<StatusEnvelope, Error> {
        let url = self.endpoint("remove-event")?;
        debug!(event_id, "removing timed event");
        self.post_command(url, &json!({ "event_id": event_id }))
            .await
    }

    /// Schedule a timed event.
    ///
    /// `POST /add-timed-event` (form-encoded). The hub answers with a
    /// redirect to the dashboard rather than an envelope, so any non-error
    /// final status counts as success.
    pub async fn add_timed_event(
        &self,
        device_id: i64,
        event_type: &str,
        event_time: &str,
    ) -> Result<(), Error> {
        let url = self.endpoint("add-timed-event")?;
        debug!(device_id, event_type, event_time, "scheduling timed event");

        let device_id = device_id.to_string();
        self.http()
            .post(url)
            .form(&[
                ("device_id", device_id.as_str()),
                ("event_type", event_type),
                ("event_time", event_time),
            ])
            .send()
            .await
            .map_err(Error::Transport)?
            .error_for_status()
            .map_err(Error::Transport)?;

        Ok(())
    }
}
