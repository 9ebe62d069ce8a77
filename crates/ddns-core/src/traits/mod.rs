//! Core traits for the DDNS system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsProvider`]: Perform one update attempt for a record
//! - [`HttpTransport`]: Issue the HTTP request behind an update attempt
//! - [`ResponseParser`]: Turn a response body into a structured document

pub mod dns_provider;
pub mod http_transport;
pub mod response_parser;

pub use dns_provider::DnsProvider;
pub use http_transport::HttpTransport;
pub use response_parser::ResponseParser;
