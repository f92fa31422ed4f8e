//! Request types.
//!
//! This module contains the caller-facing request values:
//! - [`SearchRequest`] - Search across platforms
//! - [`ExtractRequest`] - Extract content from known URLs
//! - [`SearchAndExtractRequest`] - Search, then extract every hit
//!
//! Each type validates itself with `validate()`; the client calls it before
//! building any HTTP request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::platform::{Platform, ResponseMode};
use crate::error::ClientError;
use crate::validation::{
    check_count, check_page, check_platforms, check_query, check_urls, Violations,
};

/// Default number of results per page.
pub const DEFAULT_RESULT_COUNT: u32 = 10;

/// Default (first) page.
pub const DEFAULT_PAGE: u32 = 1;

fn default_count() -> u32 {
    DEFAULT_RESULT_COUNT
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

// ============================================================================
// Search Request
// ============================================================================

/// Parameters for a search across one or more platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Platforms to search. Duplicates are allowed; emptiness is not.
    pub social_platforms: Vec<Platform>,
    /// Free-text query; trimmed before sending.
    pub query: String,
    /// Results per page (1-100).
    #[serde(default = "default_count")]
    pub count: u32,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
}

impl SearchRequest {
    /// Creates a request for the first page with the default count.
    pub fn new(social_platforms: impl Into<Vec<Platform>>, query: impl Into<String>) -> Self {
        Self {
            social_platforms: social_platforms.into(),
            query: query.into(),
            count: DEFAULT_RESULT_COUNT,
            page: DEFAULT_PAGE,
        }
    }

    /// Sets the result count.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Validates platforms, query, count, and page, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] listing every violation.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut out = Violations::new();
        check_platforms(&self.social_platforms, &mut out);
        check_query(&self.query, &mut out);
        check_count(self.count, &mut out);
        check_page(self.page, &mut out);
        out.into_result()
    }
}

// ============================================================================
// Extract Request
// ============================================================================

/// Parameters for extracting content from known post URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Absolute post URLs (1-100).
    pub urls: Vec<String>,
    /// Whether to include the comment tree. Defaults to false.
    #[serde(default)]
    pub include_comments: Option<bool>,
    /// Raw payload or markdown. Defaults to raw.
    #[serde(default)]
    pub response_mode: Option<ResponseMode>,
    /// Opaque server-defined comment filter, sent verbatim.
    #[serde(default)]
    pub comment_filter_config: Option<Value>,
}

impl ExtractRequest {
    /// Creates a request for the given URLs with default options.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            include_comments: None,
            response_mode: None,
            comment_filter_config: None,
        }
    }

    /// Sets whether comments are included.
    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = Some(include);
        self
    }

    /// Sets the response mode.
    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = Some(mode);
        self
    }

    /// Sets the comment filter configuration.
    pub fn with_comment_filter(mut self, config: Value) -> Self {
        self.comment_filter_config = Some(config);
        self
    }

    /// Returns the effective include-comments flag.
    pub fn include_comments(&self) -> bool {
        self.include_comments.unwrap_or(false)
    }

    /// Returns the effective response mode.
    pub fn response_mode(&self) -> ResponseMode {
        self.response_mode.unwrap_or_default()
    }

    /// Validates the URL list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] listing every violation.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut out = Violations::new();
        check_urls(&self.urls, &mut out);
        out.into_result()
    }
}

// ============================================================================
// Search-and-Extract Request
// ============================================================================

/// Search parameters plus extraction options; search supplies the URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAndExtractRequest {
    /// Platforms to search.
    pub social_platforms: Vec<Platform>,
    /// Free-text query; trimmed before sending.
    pub query: String,
    /// Results per page (1-100).
    #[serde(default = "default_count")]
    pub count: u32,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Whether to include the comment tree. Defaults to false.
    #[serde(default)]
    pub include_comments: Option<bool>,
    /// Raw payload or markdown. Defaults to raw.
    #[serde(default)]
    pub response_mode: Option<ResponseMode>,
    /// Opaque server-defined comment filter, sent verbatim.
    #[serde(default)]
    pub comment_filter_config: Option<Value>,
}

impl SearchAndExtractRequest {
    /// Creates a request for the first page with default options.
    pub fn new(social_platforms: impl Into<Vec<Platform>>, query: impl Into<String>) -> Self {
        Self::from(SearchRequest::new(social_platforms, query))
    }

    /// Sets the result count.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets whether comments are included.
    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = Some(include);
        self
    }

    /// Sets the response mode.
    pub fn with_response_mode(mut self, mode: ResponseMode) -> Self {
        self.response_mode = Some(mode);
        self
    }

    /// Sets the comment filter configuration.
    pub fn with_comment_filter(mut self, config: Value) -> Self {
        self.comment_filter_config = Some(config);
        self
    }

    /// Returns the effective include-comments flag.
    pub fn include_comments(&self) -> bool {
        self.include_comments.unwrap_or(false)
    }

    /// Returns the effective response mode.
    pub fn response_mode(&self) -> ResponseMode {
        self.response_mode.unwrap_or_default()
    }

    /// Validates the search half; extraction options have no failure modes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] listing every violation.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut out = Violations::new();
        check_platforms(&self.social_platforms, &mut out);
        check_query(&self.query, &mut out);
        check_count(self.count, &mut out);
        check_page(self.page, &mut out);
        out.into_result()
    }
}

impl From<SearchRequest> for SearchAndExtractRequest {
    fn from(search: SearchRequest) -> Self {
        Self {
            social_platforms: search.social_platforms,
            query: search.query,
            count: search.count,
            page: search.page,
            include_comments: None,
            response_mode: None,
            comment_filter_config: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
