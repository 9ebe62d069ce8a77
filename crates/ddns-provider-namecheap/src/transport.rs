//! reqwest-backed HTTP transport
//!
//! The production [`HttpTransport`]: one GET per call, a fixed request
//! timeout, no retries.

use async_trait::async_trait;
use ddns_core::traits::HttpTransport;
use ddns_core::{Error, Result};
use std::time::Duration;

/// Default HTTP timeout for update requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport built on [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        tracing::debug!(
            "GET {} (params: {})",
            url,
            query
                .iter()
                .map(|(key, _)| *key)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // An error status still carries a body worth classifying
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Update endpoint answered with status {}", status);
        }

        response.text().await.map_err(map_reqwest_error)
    }

    fn transport_name(&self) -> &'static str {
        "reqwest"
    }
}

/// Map a reqwest error, dropping the URL since its query holds the password
fn map_reqwest_error(err: reqwest::Error) -> Error {
    let err = err.without_url();
    if err.is_builder() {
        Error::http(format!("Invalid request: {}", err))
    } else {
        Error::transport(format!("HTTP request failed: {}", err))
    }
}
