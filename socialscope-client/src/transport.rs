//! HTTP transport seam.
//!
//! The executor talks to the network only through [`Transport`]. The default
//! implementation, [`ReqwestTransport`], wraps a shared `reqwest::Client`;
//! tests substitute scripted implementations.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use socialscope_core::{BoxError, ClientError};
use thiserror::Error;
use tracing::{debug, instrument};

// ============================================================================
// Request / Response
// ============================================================================

/// A fully-prepared HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Encoded JSON body.
    pub body: Vec<u8>,
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body.
    pub fn json(status: StatusCode, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Adds a header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Returns the status line, e.g. `"502 Bad Gateway"`.
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => "Unknown error".to_string(),
        }
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Failure before a complete response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport gave up waiting.
    #[error("Request timed out")]
    TimedOut,

    /// Connection, DNS, or TLS failure. No status was received.
    #[error("Transport failure: {0}")]
    Failed(#[source] BoxError),

    /// Status and headers arrived but the body could not be read.
    #[error("Failed to read {status} response body: {source}")]
    Body {
        /// Status of the partial response.
        status: StatusCode,
        /// Headers of the partial response.
        headers: HeaderMap,
        /// Underlying read error.
        #[source]
        source: BoxError,
    },
}

impl TransportError {
    /// Wraps any error as a transport failure.
    pub fn failed(cause: impl Into<BoxError>) -> Self {
        Self::Failed(cause.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::TimedOut
        } else {
            TransportError::Failed(Box::new(err))
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends one HTTP request and returns the completed response.
///
/// Implementations must return `Ok` for every complete response, including
/// 4xx/5xx. A response whose body cannot be read is reported as
/// [`TransportError::Body`] so its headers are not lost.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the exchange.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// [`Transport`] backed by `reqwest`.
///
/// No client-level timeout is set; the executor owns per-call timeouts.
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, ClientError> {
        let inner = Client::builder()
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { inner })
    }

    /// Wraps an existing `reqwest::Client` (e.g. one with a proxy).
    pub fn with_client(inner: Client) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .inner
            .request(request.method, &request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => {
                debug!(status = %status, error = %err, "Response body read failed");
                return Err(TransportError::Body {
                    status,
                    headers,
                    source: Box::new(err),
                });
            }
        };
        debug!(status = %status, bytes = body.len(), "Response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
