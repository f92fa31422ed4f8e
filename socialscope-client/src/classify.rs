//! Maps non-success HTTP responses onto [`ClientError`].

use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use socialscope_core::{ClientError, ErrorResponse};

use crate::rate_limit::header_u64;
use crate::transport::HttpResponse;

/// Fallback header for the server request id.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// Classifies a completed, non-2xx response.
///
/// An error body that is not JSON is tolerated: the message falls back to
/// the status line and classification proceeds on the status alone.
pub fn classify(response: &HttpResponse) -> ClientError {
    let body: ErrorResponse = serde_json::from_slice(&response.body).unwrap_or_default();

    let request_id = body.request_id.clone().or_else(|| {
        response
            .headers
            .get(HEADER_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    });
    let message = body
        .message
        .clone()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| response.status_line());

    match response.status {
        StatusCode::UNAUTHORIZED => ClientError::Authentication {
            message,
            request_id,
        },
        StatusCode::FORBIDDEN => ClientError::InsufficientCredits {
            message,
            required: body.required_credits,
            available: body.available_credits,
            request_id,
        },
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation {
            message,
            details: body.details.unwrap_or_default(),
            request_id,
        },
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited {
            message,
            retry_after: header_u64(&response.headers, RETRY_AFTER.as_str()),
            request_id,
        },
        status => ClientError::Api {
            status: status.as_u16(),
            code: body.error,
            message,
            request_id,
        },
    }
}
