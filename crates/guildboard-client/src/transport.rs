//! Abstraction for the HTTP mechanism used by [`ApiClient`](crate::ApiClient).

use std::time::Duration;

use tracing::{debug, trace};

use crate::ApiError;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the actual HTTP exchanges.
///
/// Any status the server answers with, including 4xx and 5xx, is a successful exchange and is
/// returned as an [`HttpResponse`]. Only a request that never completed is an error, reported
/// as [`ApiError::Transport`].
pub trait HttpTransport: Send + Sync {
    /// GET `url` with no body.
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;

    /// POST `body` to `url` with `Content-Type: application/json`.
    fn post_json(&self, url: &str, body: &[u8]) -> Result<HttpResponse, ApiError>;
}

/// [`HttpTransport`] backed by a shared [`ureq::Agent`].
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// A transport with no overall timeout; ureq's own defaults apply.
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();

        Self {
            agent: config.into(),
        }
    }

    fn complete(
        url: &str,
        result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> Result<HttpResponse, ApiError> {
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();

        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!("{url}: status {status}, {} bytes", body.len());
        trace!("{url}: {}", String::from_utf8_lossy(&body));

        Ok(HttpResponse { status, body })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        debug!("GET {url}");
        Self::complete(url, self.agent.get(url).call())
    }

    fn post_json(&self, url: &str, body: &[u8]) -> Result<HttpResponse, ApiError> {
        debug!("POST {url} ({} bytes)", body.len());
        let result = self
            .agent
            .post(url)
            .content_type("application/json")
            .send(body);

        Self::complete(url, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_any_2xx() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        let transport = UreqTransport::with_timeout(Some(Duration::from_secs(2)));
        let result = transport.get("http://127.0.0.1:1/unreachable");
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
