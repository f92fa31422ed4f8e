// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SocialScope` Core
//!
//! Core types, validation, and errors for the `SocialScope` client.
//!
//! This crate has no I/O. It provides:
//!
//! - Domain models (requests, search results, extracted posts)
//! - Platform payload shapes for Reddit and TikTok
//! - Request validation with field-level diagnostics
//! - The [`ClientError`] taxonomy shared by every crate
//! - Depth-unlimited JSON decoding for server responses ([`json`])
//!
//! ## Key Types
//!
//! ### Requests
//! - [`SearchRequest`] - Search one or more platforms
//! - [`ExtractRequest`] - Extract content from known URLs
//! - [`SearchAndExtractRequest`] - Search, then extract every hit
//!
//! ### Responses
//! - [`SearchResult`] - A search hit
//! - [`ExtractedPost`] - An extraction result tagged with its [`Platform`]
//! - [`RawPayload`] - Typed view of a post's raw payload
//!
//! ### Client State
//! - [`RateLimitInfo`] - Last observed rate-limit window
//!
//! ### Errors
//! - [`ClientError`] / [`ErrorKind`] - Failure taxonomy
//! - [`ValidationDetail`] - One field-level problem

pub mod error;
pub mod json;
pub mod models;
pub mod validation;

// Re-export error types
pub use error::{BoxError, ClientError, ErrorKind, ErrorResponse, ValidationDetail};

// Re-export all model types
pub use models::{
    // Enums
    Platform,
    ResponseMode,
    // Requests
    ExtractRequest,
    SearchAndExtractRequest,
    SearchRequest,
    DEFAULT_PAGE,
    DEFAULT_RESULT_COUNT,
    // Responses
    ExtractedPost,
    RawPayload,
    RedditComment,
    RedditPost,
    SearchResult,
    TiktokComment,
    TiktokPost,
    // Comment trees
    count_comments,
    thread_depth,
    Threaded,
    // Payload discrimination
    is_reddit_payload,
    is_tiktok_payload,
    // Client state
    RateLimitInfo,
};

// Re-export validation limits
pub use validation::{MAX_EXTRACT_URLS, MAX_RESULT_COUNT};
