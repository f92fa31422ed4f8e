//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use socialscope_core::{ClientError, ErrorKind, RateLimitInfo, ValidationDetail};

// ============================================================================
// Output Types
// ============================================================================

/// Envelope for a successful command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutput<'a, T: Serialize> {
    pub results: &'a [T],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitOutput>,
}

/// Observed rate-limit window.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resets_at: Option<String>,
}

impl From<&RateLimitInfo> for RateLimitOutput {
    fn from(info: &RateLimitInfo) -> Self {
        Self {
            limit: info.limit,
            remaining: info.remaining,
            reset: info.reset,
            resets_at: info.reset_at().map(|dt| dt.to_rfc3339()),
        }
    }
}

/// A failed command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput<'a> {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub details: &'a [ValidationDetail],
}

impl<'a> From<&'a ClientError> for ErrorOutput<'a> {
    fn from(err: &'a ClientError) -> Self {
        Self {
            error: kind_name(err.kind()),
            message: err.to_string(),
            status: err.status(),
            request_id: err.request_id(),
            retry_after: err.retry_after(),
            details: err.details(),
        }
    }
}

/// Stable snake_case name for an error kind.
pub fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::Authentication => "authentication",
        ErrorKind::InsufficientCredits => "insufficient_credits",
        ErrorKind::RateLimited => "rate_limited",
        ErrorKind::Api => "api",
        ErrorKind::Network => "network",
        ErrorKind::Timeout => "timeout",
        ErrorKind::InvalidConfig => "invalid_config",
        ErrorKind::Json => "json",
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats command results, with the rate-limit window when requested.
    pub fn format_results<T: Serialize>(
        &self,
        results: &[T],
        rate_limit: Option<&RateLimitInfo>,
    ) -> Result<String> {
        self.format(&CommandOutput {
            results,
            rate_limit: rate_limit.map(RateLimitOutput::from),
        })
    }

    /// Formats a client error.
    pub fn format_error(&self, err: &ClientError) -> Result<String> {
        self.format(&ErrorOutput::from(err))
    }
}
