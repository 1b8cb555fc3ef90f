//! JSON client for the dashboard's HTTP API.
//!
//! [`ApiClient::retrieve`] and [`ApiClient::submit`] never fail loudly: any problem (the request
//! never completing, a non-2xx status, a body that isn't JSON) is logged, shown to the user
//! through the client's [`Notifier`], and turned into `None`. Callers treat `None` as "no data".
//!
//! ```no_run
//! use guildboard_client::ApiClient;
//! use serde_json::json;
//!
//! let client = ApiClient::builder()
//!     .base_url("http://localhost:5000")
//!     .build();
//!
//! if let Some(stats) = client.retrieve("/api/guild/42/stats") {
//!     println!("{stats}");
//! }
//!
//! let saved = client.submit("/api/guild/42/settings", &json!({"prefix": "!"}));
//! ```
//!
//! Callers that need to know *why* a request failed can use [`ApiClient::try_retrieve`] and
//! [`ApiClient::try_submit`], which return the [`ApiError`] and leave logging and notification
//! to the caller.

use std::sync::Arc;
use std::time::Duration;

use guildboard_common::notify::{ConsoleNotifier, Notifier, Severity};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::transport::{HttpResponse, HttpTransport, UreqTransport};

/// Shown when a [`ApiClient::retrieve`] fails.
pub const RETRIEVE_ERROR_MESSAGE: &str = "Erreur lors de la récupération des données";

/// Shown when a [`ApiClient::submit`] fails.
pub const SUBMIT_ERROR_MESSAGE: &str = "Erreur lors de l'envoi des données";

/// Things that can go wrong with a request
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("network response was not ok: HTTP {0}")]
    Status(u16),

    #[error("response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("payload could not be encoded as JSON: {0}")]
    Encode(#[source] serde_json::Error),
}

pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Box<dyn HttpTransport>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            transport: None,
            notifier: None,
        }
    }

    /// Origin that relative URLs are resolved against, e.g. `http://localhost:5000`.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Overall time limit per request. Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport(mut self, transport: Box<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Where failure notifications go. Defaults to [`ConsoleNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> ApiClient {
        let timeout = self.timeout;

        let transport = self
            .transport
            .unwrap_or_else(|| Box::new(UreqTransport::with_timeout(timeout)));

        let notifier = self.notifier.unwrap_or_else(|| Arc::new(ConsoleNotifier));

        ApiClient {
            base_url: self.base_url,
            transport,
            notifier,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Retrieve and submit JSON, degrading every failure to a notification and `None`.
///
/// Holds no per-request state, so one client can be shared across threads and used for any
/// number of concurrent requests; each resolves independently.
pub struct ApiClient {
    base_url: Option<String>,
    transport: Box<dyn HttpTransport>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// A client with no base URL, the default transport and console notifications.
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Returns `None` after logging the error and showing [`RETRIEVE_ERROR_MESSAGE`] if the
    /// request fails for any reason.
    pub fn retrieve(&self, url: &str) -> Option<Value> {
        self.try_retrieve(url)
            .map_err(|e| self.report(&e, RETRIEVE_ERROR_MESSAGE))
            .ok()
    }

    /// POST `payload` as JSON to `url` and decode the reply as JSON.
    ///
    /// Returns `None` after logging the error and showing [`SUBMIT_ERROR_MESSAGE`] if the
    /// request fails for any reason.
    pub fn submit<T: Serialize + ?Sized>(&self, url: &str, payload: &T) -> Option<Value> {
        self.try_submit(url, payload)
            .map_err(|e| self.report(&e, SUBMIT_ERROR_MESSAGE))
            .ok()
    }

    /// Like [`retrieve`](Self::retrieve), but returns the failure instead of reporting it.
    pub fn try_retrieve(&self, url: &str) -> Result<Value, ApiError> {
        let url = self.resolve(url);
        let response = self.transport.get(&url)?;
        decode(response)
    }

    /// Like [`submit`](Self::submit), but returns the failure instead of reporting it.
    pub fn try_submit<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
        let url = self.resolve(url);
        let response = self.transport.post_json(&url, &body)?;
        decode(response)
    }

    fn report(&self, err: &ApiError, message: &str) {
        error!("API Error: {err}");
        self.notifier.show(message, Severity::Error);
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }

        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{base}{url}"),
            Some(base) => format!("{base}/{url}"),
            None => url.to_string(),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(response: HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Status(response.status));
    }
    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}
