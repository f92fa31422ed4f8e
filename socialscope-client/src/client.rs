//! The public `SocialScope` client.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use socialscope_core::{
    ClientError, ExtractRequest, ExtractedPost, RateLimitInfo, SearchAndExtractRequest,
    SearchRequest, SearchResult, json,
};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::executor::Executor;
use crate::transport::{ReqwestTransport, Transport};
use crate::wire::{
    EXTRACT_PATH, ExtractBody, SEARCH_AND_EXTRACT_PATH, SEARCH_PATH, SearchAndExtractBody,
    SearchBody,
};

/// Async client for the search and extraction endpoints.
///
/// Cheap to clone; clones share the connection pool and rate-limit state.
/// Every operation validates its request before touching the network.
#[derive(Debug, Clone)]
pub struct SocialScopeClient {
    executor: Arc<Executor>,
}

impl SocialScopeClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the key is malformed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    /// Creates a client from a prepared configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the HTTP stack cannot be
    /// initialised.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client over a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if the credential cannot be
    /// encoded as a header.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            executor: Arc::new(Executor::new(config, transport)?),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// Returns the rate-limit window observed on the most recent response.
    pub fn rate_limit_info(&self) -> RateLimitInfo {
        self.executor.rate_limit_info()
    }

    /// Searches the requested platforms.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without sending anything if the
    /// request is invalid, otherwise any error from the executor.
    #[instrument(skip(self, request), fields(query = %request.query, count = request.count, page = request.page))]
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, ClientError> {
        request.validate()?;
        let value = self
            .executor
            .execute(Method::POST, SEARCH_PATH, &SearchBody::from(request))
            .await?;
        let results: Vec<SearchResult> = decode(value)?;
        debug!(results = results.len(), "Search completed");
        Ok(results)
    }

    /// Extracts content from known post URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without sending anything if the
    /// request is invalid, otherwise any error from the executor.
    #[instrument(skip(self, request), fields(urls = request.urls.len()))]
    pub async fn extract(&self, request: &ExtractRequest) -> Result<Vec<ExtractedPost>, ClientError> {
        request.validate()?;
        let value = self
            .executor
            .execute(Method::POST, EXTRACT_PATH, &ExtractBody::from(request))
            .await?;
        let posts: Vec<ExtractedPost> = decode(value)?;
        debug!(posts = posts.len(), "Extraction completed");
        Ok(posts)
    }

    /// Searches, then extracts every hit, in one server-side call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without sending anything if the
    /// request is invalid, otherwise any error from the executor.
    #[instrument(skip(self, request), fields(query = %request.query, count = request.count, page = request.page))]
    pub async fn search_and_extract(
        &self,
        request: &SearchAndExtractRequest,
    ) -> Result<Vec<ExtractedPost>, ClientError> {
        request.validate()?;
        let value = self
            .executor
            .execute(
                Method::POST,
                SEARCH_AND_EXTRACT_PATH,
                &SearchAndExtractBody::from(request),
            )
            .await?;
        let posts: Vec<ExtractedPost> = decode(value)?;
        debug!(posts = posts.len(), "Search and extraction completed");
        Ok(posts)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    Ok(json::from_value(value)?)
}
