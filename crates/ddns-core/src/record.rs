//! DNS host entries kept up to date by the scheduler

use std::fmt;

/// One host entry to keep updated: a subdomain of a domain, plus the
/// domain's dynamic DNS password.
///
/// Records are built once from configuration and never change afterwards,
/// so the fields are only reachable through accessors.
///
/// # Security
///
/// The Debug implementation does NOT expose the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    domain_name: String,
    /// ⚠️ NEVER log this value
    password: String,
    subdomain: String,
}

impl Record {
    /// Create a new record
    pub fn new(
        domain_name: impl Into<String>,
        password: impl Into<String>,
        subdomain: impl Into<String>,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            password: password.into(),
            subdomain: subdomain.into(),
        }
    }

    /// The registered domain (e.g. "example.com")
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    /// The dynamic DNS password for the domain
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The host within the domain (e.g. "www", "@")
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("domain_name", &self.domain_name)
            .field("password", &"<REDACTED>")
            .field("subdomain", &self.subdomain)
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.domain_name, self.subdomain)
    }
}
