//! Error types for `SocialScope`.
//!
//! Every public operation fails with exactly one [`ClientError`]. The
//! variants form a closed taxonomy; [`ClientError::kind`] gives a flat
//! discriminator for callers that only need to branch on the category.

use std::error::Error as StdError;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed underlying cause of a transport failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// Validation Detail
// ============================================================================

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Wire path of the offending field (e.g. `urls[3]`).
    pub field: String,
    /// Machine-readable code (e.g. `too_big`).
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationDetail {
    /// Creates a new detail.
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Response (wire)
// ============================================================================

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    #[serde(default, alias = "code")]
    pub error: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Server-side request identifier.
    #[serde(default, alias = "requestId")]
    pub request_id: Option<String>,
    /// Field-level validation details (422).
    #[serde(default)]
    pub details: Option<Vec<ValidationDetail>>,
    /// Credits the request needed (403).
    #[serde(default, alias = "requiredCredits")]
    pub required_credits: Option<u64>,
    /// Credits left on the account (403).
    #[serde(default, alias = "availableCredits")]
    pub available_credits: Option<u64>,
}

// ============================================================================
// Error Kind
// ============================================================================

/// Flat discriminator over [`ClientError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected locally or by the server (422).
    Validation,
    /// Credential rejected (401).
    Authentication,
    /// Account credits exhausted (403).
    InsufficientCredits,
    /// Request throttled (429).
    RateLimited,
    /// Any other non-success status.
    Api,
    /// Transport failure after retries were exhausted.
    Network,
    /// Call aborted by the per-request timeout.
    Timeout,
    /// Client could not be constructed.
    InvalidConfig,
    /// Request or response JSON could not be processed.
    Json,
}

// ============================================================================
// Client Error
// ============================================================================

/// Error type for every `SocialScope` operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected, either locally before any request or by the server.
    #[error("Validation failed: {message}")]
    Validation {
        /// Summary message.
        message: String,
        /// Every field-level problem found.
        details: Vec<ValidationDetail>,
        /// Server request id, when the server rejected the input.
        request_id: Option<String>,
    },

    /// Missing or invalid credential (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Server message.
        message: String,
        /// Server request id.
        request_id: Option<String>,
    },

    /// Account credits exhausted (HTTP 403).
    #[error("Insufficient credits: {message}")]
    InsufficientCredits {
        /// Server message.
        message: String,
        /// Credits the request needed, if reported.
        required: Option<u64>,
        /// Credits remaining, if reported.
        available: Option<u64>,
        /// Server request id.
        request_id: Option<String>,
    },

    /// Request throttled (HTTP 429).
    #[error("Rate limited{}: {message}", retry_clause(.retry_after.as_ref()))]
    RateLimited {
        /// Server message.
        message: String,
        /// Value of the `Retry-After` header, in seconds.
        retry_after: Option<u64>,
        /// Server request id.
        request_id: Option<String>,
    },

    /// Any other non-success HTTP status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code from the body, if any.
        code: Option<String>,
        /// Server message or status line.
        message: String,
        /// Server request id.
        request_id: Option<String>,
    },

    /// Transport failure that persisted through every retry.
    #[error("Network error after {attempts} attempt(s): {source}")]
    Network {
        /// Total attempts made, including the first.
        attempts: u32,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// Call aborted because the configured timeout elapsed.
    #[error("Request timed out after {after:?}")]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// Invalid client configuration (e.g. malformed credential).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn retry_clause(retry_after: Option<&u64>) -> String {
    retry_after.map_or_else(String::new, |secs| format!(", retry after {secs} seconds"))
}

impl ClientError {
    /// Builds a validation error from a non-empty list of details.
    pub fn validation(details: Vec<ValidationDetail>) -> Self {
        let message = summarize(&details);
        Self::Validation {
            message,
            details,
            request_id: None,
        }
    }

    /// Returns the flat kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::InsufficientCredits { .. } => ErrorKind::InsufficientCredits,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::Api { .. } => ErrorKind::Api,
            Self::Network { .. } => ErrorKind::Network,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Self::Json(_) => ErrorKind::Json,
        }
    }

    /// Returns the server request id, if the error came from a response.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Validation { request_id, .. }
            | Self::Authentication { request_id, .. }
            | Self::InsufficientCredits { request_id, .. }
            | Self::RateLimited { request_id, .. }
            | Self::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status code implied by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::InsufficientCredits { .. } => Some(403),
            Self::Validation {
                request_id: Some(_),
                ..
            } => Some(422),
            Self::RateLimited { .. } => Some(429),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the `Retry-After` seconds for rate-limit errors.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns the validation details, empty for other kinds.
    pub fn details(&self) -> &[ValidationDetail] {
        match self {
            Self::Validation { details, .. } => details,
            _ => &[],
        }
    }

    /// Returns true for transport-level failures, including timeouts.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Returns true if the same call could succeed if issued again later.
    ///
    /// Timeouts and classified HTTP errors are excluded; the client never
    /// retries them on its own either.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

fn summarize(details: &[ValidationDetail]) -> String {
    match details {
        [] => "Invalid request".to_string(),
        [only] => format!("{}: {}", only.field, only.message),
        many => format!(
            "{} problems: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.field, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================
