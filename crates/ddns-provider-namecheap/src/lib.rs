// # park-your-domain DNS Provider
//
// This crate provides the update client for Namecheap's dynamic DNS
// endpoint (`dynamicdns.park-your-domain.com`).
//
// ## Protocol
//
// One update attempt is one GET request carrying three query parameters:
//
// - `domain`: the registered domain (e.g. "example.com")
// - `password`: the domain's dynamic DNS password
// - `host`: the host to update (e.g. "www", "@")
//
// The provider infers the address to publish from the request's origin and
// answers with an `interface-response` XML document:
//
// ```xml
// <interface-response>
//   <ErrCount>0</ErrCount>
//   <errors />
//   <Done>true</Done>
// </interface-response>
// ```
//
// ## Architectural Constraints
//
// - ✅ Makes exactly one HTTP request per update attempt
// - ✅ Folds every failure into an `UpdateOutcome`
// - ❌ NO retry logic (the scheduler's next sweep is the retry)
// - ❌ NO background tasks
//
// ## Security Requirements
//
// - The password travels in the query string, so request URLs are never
//   logged and are stripped from transport errors

pub mod client;
pub mod transport;
pub mod xml;

pub use client::{DEFAULT_API_URL, UpdateClient, classify};
pub use transport::{DEFAULT_HTTP_TIMEOUT, ReqwestTransport};
pub use xml::XmlResponseParser;
