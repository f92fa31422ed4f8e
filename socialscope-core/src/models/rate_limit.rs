//! Rate-limit window observed from response headers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last observed rate-limit window.
///
/// Each field is independent: a response that only carries
/// `X-RateLimit-Remaining` updates `remaining` and leaves the other two as
/// they were. Fields never go back to `None` once set. With concurrent calls
/// the values come from whichever response was processed last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// Requests allowed per window.
    pub limit: Option<u64>,
    /// Requests left in the current window.
    pub remaining: Option<u64>,
    /// Window reset time, in epoch seconds.
    pub reset: Option<u64>,
}

impl RateLimitInfo {
    /// Creates an empty (all `None`) window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites every field that is `Some` in `update`.
    pub fn merge(&mut self, update: RateLimitInfo) {
        if let Some(limit) = update.limit {
            self.limit = Some(limit);
        }
        if let Some(remaining) = update.remaining {
            self.remaining = Some(remaining);
        }
        if let Some(reset) = update.reset {
            self.reset = Some(reset);
        }
    }

    /// Returns true if no field has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.remaining.is_none() && self.reset.is_none()
    }

    /// Returns true if the server reported zero remaining requests.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Returns the reset time as a UTC timestamp.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        self.reset
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let info = RateLimitInfo::new();
        assert!(info.is_empty());
        assert!(!info.is_exhausted());
    }

    #[test]
    fn test_merge_is_per_field_and_never_clears() {
        let mut info = RateLimitInfo {
            limit: Some(1000),
            remaining: Some(999),
            reset: Some(1_700_000_000),
        };
        info.merge(RateLimitInfo {
            remaining: Some(150),
            ..RateLimitInfo::default()
        });

        assert_eq!(info.limit, Some(1000));
        assert_eq!(info.remaining, Some(150));
        assert_eq!(info.reset, Some(1_700_000_000));
    }

    #[test]
    fn test_reset_at() {
        let info = RateLimitInfo {
            reset: Some(0),
            ..RateLimitInfo::default()
        };
        assert_eq!(info.reset_at().unwrap().timestamp(), 0);
        assert!(RateLimitInfo::new().reset_at().is_none());
    }
}
