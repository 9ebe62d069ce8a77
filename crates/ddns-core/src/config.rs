//! Configuration types for the DDNS system
//!
//! This module defines all configuration structures used throughout the crate.
//!
//! Configuration is a JSON document:
//!
//! ```json
//! {
//!   "interval": 300,
//!   "verbose": true,
//!   "records": [
//!     { "domain": "example.com", "password": "…", "hosts": ["@", "www"] }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::record::Record;

/// Longest accepted interval between updates (one day)
const MAX_INTERVAL_SECS: u64 = 86_400;

/// Main DDNS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DdnsConfig {
    /// Seconds to wait after each record's update
    #[serde(default = "default_interval_secs")]
    pub interval: u64,

    /// Log every attempt and every success, not only failures
    #[serde(default)]
    pub verbose: bool,

    /// Domains to manage, each with one or more hosts
    pub records: Vec<DomainConfig>,

    /// Optional provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl DdnsConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            interval: default_interval_secs(),
            verbose: false,
            records: Vec::new(),
            provider: ProviderConfig::default(),
        }
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.records.is_empty() {
            return Err(crate::Error::config("No records configured"));
        }

        if !(1..=MAX_INTERVAL_SECS).contains(&self.interval) {
            return Err(crate::Error::config(format!(
                "interval must be between 1 and {} seconds. Got: {}",
                MAX_INTERVAL_SECS, self.interval
            )));
        }

        for domain in &self.records {
            domain.validate()?;
        }

        self.provider.validate()?;

        Ok(())
    }

    /// Flatten domains and hosts into records, in configuration order
    pub fn records(&self) -> Vec<Record> {
        self.records
            .iter()
            .flat_map(|domain| {
                domain
                    .hosts
                    .iter()
                    .map(|host| Record::new(&domain.domain, &domain.password, host))
            })
            .collect()
    }

    /// The interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

impl Default for DdnsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One domain and the hosts to keep updated under it
///
/// # Security
///
/// The Debug implementation does NOT expose the password.
#[derive(Clone, Deserialize)]
pub struct DomainConfig {
    /// Registered domain name (e.g., "example.com")
    pub domain: String,

    /// Dynamic DNS password issued for the domain
    pub password: String,

    /// Hosts to update (e.g., "@", "www", "*")
    pub hosts: Vec<String>,
}

impl DomainConfig {
    /// Create a new domain configuration
    pub fn new(
        domain: impl Into<String>,
        password: impl Into<String>,
        hosts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            domain: domain.into(),
            password: password.into(),
            hosts: hosts.into_iter().map(Into::into).collect(),
        }
    }

    /// Validate the domain configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate_domain_name(&self.domain)?;

        if self.password.is_empty() {
            return Err(crate::Error::config(format!(
                "Password for {} cannot be empty",
                self.domain
            )));
        }

        if self.hosts.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain {} has no hosts configured",
                self.domain
            )));
        }

        if self.hosts.iter().any(|host| host.trim().is_empty()) {
            return Err(crate::Error::config(format!(
                "Domain {} has an empty host entry",
                self.domain
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for DomainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainConfig")
            .field("domain", &self.domain)
            .field("password", &"<REDACTED>")
            .field("hosts", &self.hosts)
            .finish()
    }
}

/// Provider endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Override for the update endpoint (None = provider default)
    #[serde(default)]
    pub api_url: Option<String>,

    /// HTTP request timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let Some(ref url) = self.api_url
            && !url.starts_with("https://")
            && !url.starts_with("http://")
        {
            return Err(crate::Error::config(format!(
                "api_url must use HTTP or HTTPS scheme. Got: {}",
                url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(crate::Error::config("timeout_secs must be > 0"));
        }

        Ok(())
    }

    /// The request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    300
}

fn default_timeout_secs() -> u64 {
    30
}

/// Validate that a string is a valid domain name
///
/// This implements basic DNS domain name validation per RFC 1035.
/// It's not comprehensive but catches common errors.
pub fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    if domain.is_empty() {
        return Err(crate::Error::config("Domain name cannot be empty"));
    }

    // Total length limit (RFC 1035: 253 chars max)
    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(crate::Error::config(format!(
                "Domain label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
