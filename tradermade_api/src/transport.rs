//! The network boundary: one blocking HTTP GET returning the body as text.

use std::time::Duration;

use crate::Error;

/// Request timeout for the default HTTP transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Performs an HTTP GET against an absolute URL and returns the full response body.
///
/// Implementations own their timeout policy. A call that hangs blocks the caller
/// until the implementation gives up.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String, Error>;
}

/// Default [`Transport`] backed by a blocking `reqwest` client.
///
/// Non-2xx responses are logged and their body is still returned, because the
/// service reports its own errors as JSON documents.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tradermade-rust/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, Error> {
        // reqwest errors embed the URL, which carries the API key.
        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Failed to get resource: {}", e);
                Error::Transport(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e.to_string())
        })?;

        if !status.is_success() {
            tracing::warn!("Service answered with status {}", status);
        }
        Ok(body)
    }
}
