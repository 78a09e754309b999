//! Upstream JSON fetcher.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::Result;

/// Issues one unauthenticated GET per call and decodes the JSON body.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Create a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hadoop-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `url` and decode its body as JSON.
    ///
    /// Returns `Ok(None)` when nothing could be fetched: the upstream was
    /// unreachable, timed out, or answered with a non-success status.
    /// A body that is not valid JSON is an error.
    pub async fn fetch_json(&self, url: &str) -> Result<Option<Value>> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Upstream request failed");
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Upstream returned non-success status");
            return Ok(None);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read upstream response body");
                return Ok(None);
            }
        };

        let payload: Value = serde_json::from_slice(&body)?;
        debug!(url = %url, bytes = body.len(), "Fetched upstream payload");
        trace!(url = %url, payload = %payload, "Upstream payload");

        Ok(Some(payload))
    }
}
