//! Domain models for SocialScope.
//!
//! ## Submodules
//!
//! - [`platform`] - Closed enums (Platform, ResponseMode)
//! - [`request`] - Request values and their validation
//! - [`result`] - Search hits
//! - [`post`] - Extracted posts and platform payloads
//! - [`rate_limit`] - Observed rate-limit window

pub mod platform;
pub mod post;
pub mod rate_limit;
pub mod request;
pub mod result;

// Re-export everything at the models level
pub use platform::{Platform, ResponseMode};
pub use post::{
    count_comments, is_reddit_payload, is_tiktok_payload, thread_depth, ExtractedPost,
    RawPayload, RedditComment, RedditPost, Threaded, TiktokComment, TiktokPost,
};
pub use rate_limit::RateLimitInfo;
pub use request::{
    ExtractRequest, SearchAndExtractRequest, SearchRequest, DEFAULT_PAGE, DEFAULT_RESULT_COUNT,
};
pub use result::SearchResult;
#[cfg(test)]
mod serde_tests;
