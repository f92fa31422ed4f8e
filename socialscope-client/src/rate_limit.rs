//! Rate-limit header parsing and per-client tracking.

use std::sync::{Mutex, PoisonError};

use reqwest::header::HeaderMap;
use socialscope_core::RateLimitInfo;
use tracing::trace;

/// Requests allowed per window.
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
/// Requests left in the current window.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Window reset, epoch seconds.
pub const HEADER_RESET: &str = "x-ratelimit-reset";

/// Extracts whichever rate-limit headers are present and parse as integers.
pub fn parse_rate_limit_headers(headers: &HeaderMap) -> RateLimitInfo {
    RateLimitInfo {
        limit: header_u64(headers, HEADER_LIMIT),
        remaining: header_u64(headers, HEADER_REMAINING),
        reset: header_u64(headers, HEADER_RESET),
    }
}

pub(crate) fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Shared, last-write-wins rate-limit state for one client.
///
/// The lock is held only to merge or copy the value, never across an await.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    state: Mutex<RateLimitInfo>,
}

impl RateLimitTracker {
    /// Creates a tracker with nothing observed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the rate-limit headers of a completed response.
    pub fn record(&self, headers: &HeaderMap) {
        let update = parse_rate_limit_headers(headers);
        if update.is_empty() {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.merge(update);
        trace!(limit = ?state.limit, remaining = ?state.remaining, reset = ?state.reset, "Rate limit updated");
    }

    /// Returns a copy of the current window.
    pub fn snapshot(&self) -> RateLimitInfo {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_parse_all_headers() {
        let info = parse_rate_limit_headers(&headers(&[
            (HEADER_LIMIT, "1000"),
            (HEADER_REMAINING, "150"),
            (HEADER_RESET, "1700000000"),
        ]));
        assert_eq!(info.limit, Some(1000));
        assert_eq!(info.remaining, Some(150));
        assert_eq!(info.reset, Some(1_700_000_000));
    }

    #[test]
    fn test_unparseable_header_ignored() {
        let info = parse_rate_limit_headers(&headers(&[(HEADER_REMAINING, "lots")]));
        assert!(info.is_empty());
    }

    #[test]
    fn test_tracker_merges_per_field() {
        let tracker = RateLimitTracker::new();
        tracker.record(&headers(&[(HEADER_LIMIT, "1000"), (HEADER_REMAINING, "999")]));
        tracker.record(&headers(&[(HEADER_REMAINING, "150")]));
        tracker.record(&HeaderMap::new());

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.limit, Some(1000));
        assert_eq!(snapshot.remaining, Some(150));
        assert_eq!(snapshot.reset, None);
    }
}
