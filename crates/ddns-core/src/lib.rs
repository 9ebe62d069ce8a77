// # ddns-core
//
// Core library for the park-your-domain dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the core functionality for dynamic DNS updates:
// - **Record**: One (domain, password, subdomain) host entry to keep updated
// - **UpdateOutcome**: The typed result of one update attempt
// - **DnsProvider**: Trait for performing one update attempt per record
// - **HttpTransport / ResponseParser**: Capabilities a provider is built from
// - **Scheduler**: Walks all records forever at a fixed interval
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Explicit Wiring**: Records are built once from configuration and
//    handed to the Scheduler; nothing registers itself globally
// 3. **Outcomes, not Exceptions**: Every attempt yields exactly one
//    `UpdateOutcome`; failures never escape a scheduling iteration
// 4. **Library-First**: All core functionality can be used as a library

pub mod config;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::{DdnsConfig, DomainConfig, ProviderConfig};
pub use engine::{Scheduler, SweepSummary};
pub use error::{Error, Result};
pub use outcome::{ProviderError, UpdateOutcome};
pub use record::Record;
pub use traits::{DnsProvider, HttpTransport, ResponseParser};
