//! Request bodies as sent on the wire.
//!
//! Built from validated requests: the query is trimmed and optional
//! extraction flags are resolved to their defaults.

use serde::Serialize;
use serde_json::Value;
use socialscope_core::{
    ExtractRequest, Platform, ResponseMode, SearchAndExtractRequest, SearchRequest,
};

/// Search endpoint.
pub const SEARCH_PATH: &str = "/search";
/// Extract endpoint.
pub const EXTRACT_PATH: &str = "/extract";
/// Combined endpoint.
pub const SEARCH_AND_EXTRACT_PATH: &str = "/search-and-extract";

/// Body for `POST /search`.
#[derive(Debug, Serialize)]
pub struct SearchBody<'a> {
    pub social_platforms: &'a [Platform],
    pub query: &'a str,
    pub count: u32,
    pub page: u32,
}

impl<'a> From<&'a SearchRequest> for SearchBody<'a> {
    fn from(req: &'a SearchRequest) -> Self {
        Self {
            social_platforms: &req.social_platforms,
            query: req.query.trim(),
            count: req.count,
            page: req.page,
        }
    }
}

/// Extraction options shared by the extract and combined bodies.
#[derive(Debug, Serialize)]
pub struct ExtractOptions<'a> {
    pub include_comments: bool,
    pub response_mode: ResponseMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_filter_config: Option<&'a Value>,
}

/// Body for `POST /extract`.
#[derive(Debug, Serialize)]
pub struct ExtractBody<'a> {
    pub urls: &'a [String],
    #[serde(flatten)]
    pub options: ExtractOptions<'a>,
}

impl<'a> From<&'a ExtractRequest> for ExtractBody<'a> {
    fn from(req: &'a ExtractRequest) -> Self {
        Self {
            urls: &req.urls,
            options: ExtractOptions {
                include_comments: req.include_comments(),
                response_mode: req.response_mode(),
                comment_filter_config: req.comment_filter_config.as_ref(),
            },
        }
    }
}

/// Body for `POST /search-and-extract`.
#[derive(Debug, Serialize)]
pub struct SearchAndExtractBody<'a> {
    #[serde(flatten)]
    pub search: SearchBody<'a>,
    #[serde(flatten)]
    pub options: ExtractOptions<'a>,
}

impl<'a> From<&'a SearchAndExtractRequest> for SearchAndExtractBody<'a> {
    fn from(req: &'a SearchAndExtractRequest) -> Self {
        Self {
            search: SearchBody {
                social_platforms: &req.social_platforms,
                query: req.query.trim(),
                count: req.count,
                page: req.page,
            },
            options: ExtractOptions {
                include_comments: req.include_comments(),
                response_mode: req.response_mode(),
                comment_filter_config: req.comment_filter_config.as_ref(),
            },
        }
    }
}
