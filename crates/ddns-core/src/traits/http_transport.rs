// # HTTP Transport Trait
//
// The capability a provider uses to reach its update endpoint.
//
// ## Implementations
//
// - reqwest: `ddns-provider-namecheap::ReqwestTransport`
// - Tests: canned responses or simulated connection failures

use async_trait::async_trait;

/// Trait for issuing HTTP GET requests
///
/// # Error Contract
///
/// An HTTP error status is still a response: its body must be returned as
/// `Ok`, since the provider may describe the failure in it. Only failures
/// that leave no response at all are errors:
///
/// - [`crate::Error::Transport`]: connection refused, timeout, body read
///   failure
/// - [`crate::Error::Http`]: the request could not be built (e.g. the URL is
///   invalid)
///
/// # Trust Level: Untrusted
///
/// Transports must not retry, sleep, or cache. One call is one request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a GET request and return the raw response body
    ///
    /// # Parameters
    ///
    /// - `url`: The endpoint URL, without query string
    /// - `query`: Query parameters, appended in order
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, crate::Error>;

    /// Get the transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}
