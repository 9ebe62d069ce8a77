//! Update protocol client
//!
//! One update attempt is one GET to the update endpoint:
//!
//! ```http
//! GET /update?domain=example.com&password=<password>&host=www
//! ```
//!
//! The provider answers with an `interface-response` XML document. The
//! client parses it and classifies it into exactly one [`UpdateOutcome`].

use async_trait::async_trait;
use ddns_core::traits::{DnsProvider, HttpTransport, ResponseParser};
use ddns_core::{ProviderConfig, ProviderError, Record, Result, UpdateOutcome};
use serde_json::Value;
use std::fmt;

use crate::transport::ReqwestTransport;
use crate::xml::XmlResponseParser;

/// Production update endpoint
pub const DEFAULT_API_URL: &str = "https://dynamicdns.park-your-domain.com/update";

const INTERFACE_RESPONSE: &str = "interface-response";
const ERR_COUNT: &str = "ErrCount";
const ERRORS: &str = "errors";
const DONE: &str = "Done";

/// park-your-domain update client
///
/// The endpoint URL, HTTP transport and response parser are supplied at
/// construction. [`UpdateClient::new`] wires the production ones; tests use
/// [`UpdateClient::with_parts`].
pub struct UpdateClient {
    api_url: String,
    transport: Box<dyn HttpTransport>,
    parser: Box<dyn ResponseParser>,
}

impl UpdateClient {
    /// Create a client for the production endpoint
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(
            DEFAULT_API_URL,
            Box::new(ReqwestTransport::new()?),
            Box::new(XmlResponseParser::new()),
        ))
    }

    /// Create a client from provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_url = config.api_url.as_deref().unwrap_or(DEFAULT_API_URL);

        Ok(Self::with_parts(
            api_url,
            Box::new(ReqwestTransport::with_timeout(config.timeout())?),
            Box::new(XmlResponseParser::new()),
        ))
    }

    /// Create a client from explicit parts
    pub fn with_parts(
        api_url: impl Into<String>,
        transport: Box<dyn HttpTransport>,
        parser: Box<dyn ResponseParser>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            transport,
            parser,
        }
    }

    /// The endpoint this client sends updates to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Perform one update attempt for `record`
    pub async fn update(&self, record: &Record) -> UpdateOutcome {
        let query = [
            ("domain", record.domain_name()),
            ("password", record.password()),
            ("host", record.subdomain()),
        ];

        tracing::debug!("Sending update for {} to {}", record, self.api_url);

        let body = match self.transport.get(&self.api_url, &query).await {
            Ok(body) => body,
            Err(e) if e.is_transport() => {
                return UpdateOutcome::TransportFailure {
                    reason: e.to_string(),
                };
            }
            Err(e) => {
                return UpdateOutcome::UnknownFailure {
                    reason: e.to_string(),
                };
            }
        };

        match self.parser.parse(&body) {
            Ok(document) => classify(&document),
            Err(e) => UpdateOutcome::malformed(e.to_string()),
        }
    }
}

impl fmt::Debug for UpdateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateClient")
            .field("api_url", &self.api_url)
            .field("transport", &self.transport.transport_name())
            .finish()
    }
}

#[async_trait]
impl DnsProvider for UpdateClient {
    async fn update(&self, record: &Record) -> UpdateOutcome {
        UpdateClient::update(self, record).await
    }

    fn provider_name(&self) -> &'static str {
        "namecheap"
    }
}

/// Classify a parsed response document
///
/// Fields are looked up in order and the first decisive one wins:
///
/// 1. `interface-response` must be an object
/// 2. `ErrCount` must be present; anything but `"0"` means provider errors,
///    whose detail must be an `errors` object
/// 3. `Done` must be present; `"false"` means the update was not done
/// 4. Otherwise the update succeeded
///
/// A missing or ill-shaped field yields [`UpdateOutcome::MalformedResponse`].
pub fn classify(document: &Value) -> UpdateOutcome {
    let Some(response) = document.get(INTERFACE_RESPONSE).and_then(Value::as_object) else {
        return UpdateOutcome::malformed(format!("missing <{}> object", INTERFACE_RESPONSE));
    };

    let Some(err_count) = response.get(ERR_COUNT) else {
        return UpdateOutcome::malformed(format!("missing <{}>", ERR_COUNT));
    };

    if err_count.as_str() != Some("0") {
        return match response.get(ERRORS).and_then(Value::as_object) {
            Some(errors) => UpdateOutcome::ProviderErrors(
                errors
                    .iter()
                    .map(|(code, message)| ProviderError::new(code, message_text(message)))
                    .collect(),
            ),
            None => UpdateOutcome::malformed(format!(
                "{} is {} but <{}> holds no entries",
                ERR_COUNT, err_count, ERRORS
            )),
        };
    }

    match response.get(DONE) {
        None => UpdateOutcome::malformed(format!("missing <{}>", DONE)),
        Some(done) if done.as_str() == Some("false") => UpdateOutcome::NotDone,
        Some(_) => UpdateOutcome::Success,
    }
}

fn message_text(message: &Value) -> String {
    match message {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
