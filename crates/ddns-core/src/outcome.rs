// # Update Outcome
//
// The result of a single update attempt for one record.
//
// Exactly one variant is produced per attempt. When several conditions hold
// at once, the earlier one in this list wins:
//
// 1. TransportFailure   (no response at all)
// 2. MalformedResponse  (response unreadable or missing structure)
// 3. ProviderErrors     (provider reported a nonzero error count)
// 4. NotDone            (provider did not complete the update)
// 5. Success
//
// UnknownFailure sits outside the ladder: it covers attempts that failed for
// a reason none of the above describe (e.g. the request could not be built).

use std::fmt;

/// A single error entry reported by the provider (e.g. `Err1: Invalid password`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    /// Error identifier as named by the provider
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ProviderError {
    /// Create a new provider error entry
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Result of one update attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The provider accepted and completed the update
    Success,

    /// The response could not be parsed or lacked a required field
    MalformedResponse {
        /// What was wrong with the response (diagnostic only)
        reason: String,
    },

    /// The provider acknowledged the request but did not complete it
    NotDone,

    /// The provider reported one or more errors, in document order
    ProviderErrors(Vec<ProviderError>),

    /// The HTTP exchange could not be completed
    TransportFailure {
        /// Underlying transport error (diagnostic only)
        reason: String,
    },

    /// Any other failure during the attempt
    UnknownFailure {
        /// Underlying error (diagnostic only)
        reason: String,
    },
}

impl UpdateOutcome {
    /// Shorthand for a malformed response outcome
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Whether the attempt provably succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Stable short name of the variant, for structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::NotDone => "not_done",
            Self::ProviderErrors(_) => "provider_errors",
            Self::TransportFailure { .. } => "transport_failure",
            Self::UnknownFailure { .. } => "unknown_failure",
        }
    }
}
