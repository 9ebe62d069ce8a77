// # DNS Provider Trait
//
// Defines the interface for notifying a dynamic DNS provider about a record.
//
// ## Implementations
//
// - park-your-domain (Namecheap): `ddns-provider-namecheap` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, Record, UpdateOutcome};
//
// #[tokio::main]
// async fn main() {
//     let provider = /* DnsProvider implementation */;
//     let record = Record::new("example.com", "password", "www");
//
//     match provider.update(&record).await {
//         UpdateOutcome::Success => println!("updated"),
//         other => println!("failed: {}", other.kind()),
//     }
// }
// ```

use async_trait::async_trait;

use crate::outcome::UpdateOutcome;
use crate::record::Record;

/// Trait for DNS provider implementations
///
/// A provider performs exactly one update attempt per call and folds every
/// failure into the returned [`UpdateOutcome`]. Nothing escapes as an error
/// or panic, so the scheduler can always move on to the next record.
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP/HTTPS calls to the provider's endpoint only
/// - ✅ Parse provider-specific responses
/// - ✅ Return an outcome (the scheduler decides what happens next)
///
/// ## Forbidden Capabilities
/// - ❌ Spawn tasks or threads
/// - ❌ Implement retry logic or backoff (the next sweep is the retry)
/// - ❌ Sleep or make scheduling decisions (owned by `Scheduler`)
/// - ❌ Cache state beyond a single request
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Perform one update attempt for a record
    ///
    /// # Parameters
    ///
    /// - `record`: The host entry to update
    ///
    /// # Returns
    ///
    /// Exactly one [`UpdateOutcome`] describing the attempt.
    async fn update(&self, record: &Record) -> UpdateOutcome;

    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "namecheap")
    fn provider_name(&self) -> &'static str;
}
