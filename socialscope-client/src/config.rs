//! Client configuration.
//!
//! A [`ClientConfig`] is built once through [`ClientConfigBuilder`],
//! validated at `build()`, and never mutated afterwards.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use socialscope_core::ClientError;
use url::Url;

// ============================================================================
// Defaults
// ============================================================================

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.socialscope.dev";

/// Version segment inserted between the base URL and endpoint paths.
pub const API_VERSION: &str = "v1";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff unit in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Every API key starts with this prefix.
pub const API_KEY_PREFIX: &str = "sk_";

// ============================================================================
// Client Config
// ============================================================================

/// Immutable settings for a client instance.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    max_retries: u32,
    retry_delay: Duration,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the key is malformed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder(api_key).build()
    }

    /// Creates a builder for customizing the configuration.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key)
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout; `None` means unlimited.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the backoff unit.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the full URL for an endpoint path such as `/search`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}{}", self.base_url, API_VERSION, path)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

/// Keeps the prefix and last four characters of a key.
fn redact(key: &str) -> String {
    let visible = key.len().saturating_sub(4);
    match key.get(visible..) {
        Some(tail) if key.len() > API_KEY_PREFIX.len() + 4 => format!("{API_KEY_PREFIX}…{tail}"),
        _ => format!("{API_KEY_PREFIX}…"),
    }
}

// ============================================================================
// Client Config Builder
// ============================================================================

/// Builder for constructing a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
    retry_delay: Duration,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout: Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }

    /// Sets the base URL (defaults to [`DEFAULT_BASE_URL`]).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the per-request timeout. A zero duration disables it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Sets the per-request timeout in milliseconds. Zero disables it.
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Disables the per-request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Sets the number of retries after the first attempt.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the backoff unit.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the backoff unit in milliseconds.
    pub fn retry_delay_ms(self, millis: u64) -> Self {
        self.retry_delay(Duration::from_millis(millis))
    }

    /// Validates the settings and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the API key is empty, lacks
    /// the `sk_` prefix, or cannot be sent as a header, or if the base URL is
    /// not an absolute http(s) URL.
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        validate_api_key(&self.api_key)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = validate_base_url(&base_url)?;

        Ok(ClientConfig {
            api_key: self.api_key,
            base_url,
            timeout: self.timeout,
            max_retries: self.max_retries,
            retry_delay: self.retry_delay,
        })
    }
}

fn validate_api_key(api_key: &str) -> Result<(), ClientError> {
    if api_key.is_empty() {
        return Err(ClientError::InvalidConfig("API key is required".to_string()));
    }
    if !api_key.starts_with(API_KEY_PREFIX) {
        return Err(ClientError::InvalidConfig(format!(
            "API key must start with '{API_KEY_PREFIX}'"
        )));
    }
    if HeaderValue::from_str(&format!("Bearer {api_key}")).is_err() {
        return Err(ClientError::InvalidConfig(
            "API key contains characters that cannot be sent in a header".to_string(),
        ));
    }
    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<String, ClientError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| ClientError::InvalidConfig(format!("Invalid base URL '{base_url}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(ClientError::InvalidConfig(format!(
            "Base URL must be an absolute http(s) URL, got '{base_url}'"
        )));
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use socialscope_core::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("sk_abc").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Some(Duration::from_millis(DEFAULT_TIMEOUT_MS)));
        assert_eq!(config.max_retries(), DEFAULT_MAX_RETRIES);
        assert_eq!(config.retry_delay(), Duration::from_millis(DEFAULT_RETRY_DELAY_MS));
    }

    #[test]
    fn test_api_key_format() {
        for bad in ["", "abc", "pk_live_123", "SK_abc"] {
            let err = ClientConfig::new(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfig, "key {bad:?}");
        }
        assert!(ClientConfig::new("sk_").is_ok());
        assert!(ClientConfig::new("sk_bad\nkey").is_err());
    }

    #[test]
    fn test_zero_timeout_means_unlimited() {
        let config = ClientConfig::builder("sk_abc").timeout_ms(0).build().unwrap();
        assert_eq!(config.timeout(), None);

        let config = ClientConfig::builder("sk_abc")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_endpoint_url() {
        let config = ClientConfig::builder("sk_abc")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(config.endpoint_url("/search"), "http://localhost:8080/v1/search");
    }

    #[test]
    fn test_invalid_base_url() {
        for bad in ["not a url", "ftp://example.com", "localhost:8080"] {
            assert!(
                ClientConfig::builder("sk_abc").base_url(bad).build().is_err(),
                "base url {bad:?}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("sk_live_supersecret1234").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("1234"));
    }
}
