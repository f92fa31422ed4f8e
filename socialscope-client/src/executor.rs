//! Request executor.
//!
//! One [`Executor`] per client. It owns the prepared headers, the retry
//! policy, and the rate-limit tracker, and drives every call through the
//! [`Transport`] seam.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use socialscope_core::{BoxError, ClientError, RateLimitInfo, json};
use tracing::{debug, instrument, warn};

use crate::classify::classify;
use crate::config::ClientConfig;
use crate::rate_limit::RateLimitTracker;
use crate::retry::RetryPolicy;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Fixed client identifier sent as `User-Agent`.
pub const USER_AGENT_VALUE: &str = concat!("socialscope-rust/", env!("CARGO_PKG_VERSION"));

/// Sends authenticated JSON requests with timeout and retry handling.
pub struct Executor {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    headers: HeaderMap,
    rate_limits: RateLimitTracker,
}

impl Executor {
    /// Creates an executor over the given transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the credential cannot be
    /// encoded as a header.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid API key: {e}")))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            retry: RetryPolicy::from_config(&config),
            config,
            transport,
            headers,
            rate_limits: RateLimitTracker::new(),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a copy of the last observed rate-limit window.
    pub fn rate_limit_info(&self) -> RateLimitInfo {
        self.rate_limits.snapshot()
    }

    /// Sends `body` to `path` and returns the parsed success body.
    ///
    /// Transport failures are retried with linear backoff. Timeouts and
    /// non-2xx responses end the call immediately.
    ///
    /// # Errors
    ///
    /// Returns the classified error for non-2xx responses,
    /// [`ClientError::Timeout`] when the per-call timeout elapses,
    /// [`ClientError::Network`] once retries are exhausted, and
    /// [`ClientError::Json`] if encoding or decoding fails.
    #[instrument(skip(self, body))]
    pub async fn execute<B>(&self, method: Method, path: &str, body: &B) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint_url(path);
        let body = serde_json::to_vec(body)?;

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            debug!(url = %url, attempt, bytes = body.len(), "Sending request");

            let request = HttpRequest {
                method: method.clone(),
                url: url.clone(),
                headers: self.headers.clone(),
                body: body.clone(),
            };

            match self.send_once(request).await {
                Ok(response) => {
                    self.rate_limits.record(&response.headers);
                    return Self::finish(&response);
                }
                Err(TransportError::TimedOut) => {
                    let after = self.config.timeout().unwrap_or_default();
                    warn!(attempt, ?after, "Request timed out");
                    return Err(ClientError::Timeout { after });
                }
                Err(TransportError::Body {
                    status,
                    headers,
                    source,
                }) => {
                    self.rate_limits.record(&headers);
                    debug!(status = status.as_u16(), "Response body lost");
                    self.back_off(attempt, source).await?;
                }
                Err(TransportError::Failed(source)) => self.back_off(attempt, source).await?,
            }
        }
    }

    /// Sleeps before the next attempt, or ends the call once retries run out.
    async fn back_off(&self, attempt: u32, source: BoxError) -> Result<(), ClientError> {
        if !self.retry.allows_retry(attempt - 1) {
            warn!(error = %source, attempts = attempt, "Request failed, giving up");
            return Err(ClientError::Network {
                attempts: attempt,
                source,
            });
        }
        let delay = self.retry.delay_for_retry(attempt);
        warn!(
            error = %source,
            attempt,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Request failed, retrying"
        );
        tokio::time::sleep(delay).await;
        Ok(())
    }

    async fn send_once(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let send = self.transport.send(request);
        match self.config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, send).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::TimedOut),
            },
            None => send.await,
        }
    }

    fn finish(response: &HttpResponse) -> Result<Value, ClientError> {
        if !response.status.is_success() {
            let err = classify(response);
            warn!(status = response.status.as_u16(), error = %err, "Request rejected");
            return Err(err);
        }
        debug!(status = response.status.as_u16(), "Request succeeded");
        Ok(json::from_slice(&response.body)?)
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("rate_limits", &self.rate_limits)
            .finish_non_exhaustive()
    }
}
