// Map background endpoint

use tracing::debug;

use crate::client::HubClient;
use crate::error::Error;
use crate::models::MapImage;

impl HubClient {
    /// Fetch the floor-plan image the dashboard map is drawn over.
    ///
    /// `GET /map-background` -- returns `None` when no map has been
    /// uploaded to the hub yet (the hub answers 404).
    pub async fn map_background(&self) -> Result<Option<MapImage>, Error> {
        let url = self.endpoint("map-background")?;
        debug!("fetching map background");

        let resp = self
            .http()
            .get(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp.error_for_status().map_err(Error::Transport)?;

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = resp.bytes().await.map_err(Error::Transport)?;

        Ok(Some(MapImage {
            content_type,
            bytes: bytes.to_vec(),
        }))
    }
}
