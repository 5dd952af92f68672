// Hub API HTTP client
//
// Wraps `reqwest::Client` with hub-specific URL construction and envelope
// unwrapping. Endpoint groups (devices, events, map) are implemented as
// inherent methods via separate files to keep this module focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::StatusEnvelope;
use crate::transport::TransportConfig;

/// Raw HTTP client for the hearth hub API.
///
/// Handles the `{status, message}` command envelope and endpoint URL
/// construction. Command methods return the hub's success message --
/// the envelope is stripped and `status != "success"` surfaces as
/// [`Error::Hub`] before the caller sees anything.
pub struct HubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HubClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the hub root (e.g. `http://192.168.1.50`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The hub base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a hub endpoint path.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(Error::Transport)?
            .error_for_status()
            .map_err(Error::Transport)?;

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Send a POST request with a JSON body and unwrap the command envelope.
    pub(crate) async fn post_command(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<StatusEnvelope, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Send a POST request with a form-encoded body and unwrap the envelope.
    pub(crate) async fn post_form(
        &self,
        url: Url,
        form: &impl Serialize,
    ) -> Result<StatusEnvelope, Error> {
        debug!("POST {} (form)", url);

        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Parse the `{status, message}` envelope, returning it on success or
    /// an `Error::Hub` if `status != "success"`.
    ///
    /// The hub sends the envelope with 400/500 statuses as well, so the
    /// body is parsed regardless of the HTTP status code.
    async fn parse_envelope(resp: reqwest::Response) -> Result<StatusEnvelope, Error> {
        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: StatusEnvelope =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if envelope.is_success() {
            Ok(envelope)
        } else {
            Err(Error::Hub {
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("status={}", envelope.status)),
            })
        }
    }
}
