//! Response parsing capability
//!
//! Parsers turn a provider's raw response body into a structured document.
//! Element names become keys, text becomes string values, so a provider can
//! classify the response with plain lookups:
//!
//! ```text
//! <interface-response>            {"interface-response": {
//!   <ErrCount>0</ErrCount>    →       "ErrCount": "0",
//!   <Done>true</Done>                 "Done": "true"
//! </interface-response>           }}
//! ```

use serde_json::Value;

/// Trait for response body parsers
///
/// Parsing is pure and synchronous. Any failure (syntax error, empty body,
/// wrong shape) is reported as [`crate::Error::Parse`].
pub trait ResponseParser: Send + Sync {
    /// Parse a response body into a structured document
    fn parse(&self, body: &str) -> Result<Value, crate::Error>;
}
