//! Request validation rules.
//!
//! Rules run in a fixed order per request type and every violation is
//! collected, so a caller sees all problems at once. Nothing here touches
//! the network.

use url::Url;

use crate::error::{ClientError, ValidationDetail};
use crate::models::Platform;

/// Upper bound for `count`.
pub const MAX_RESULT_COUNT: u32 = 100;

/// Upper bound for the number of URLs in one extract call.
pub const MAX_EXTRACT_URLS: usize = 100;

/// Collects validation details for one request.
#[derive(Debug, Default)]
pub struct Violations {
    details: Vec<ValidationDetail>,
}

impl Violations {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn push(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.details.push(ValidationDetail::new(field, code, message));
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Returns the recorded details.
    pub fn details(&self) -> &[ValidationDetail] {
        &self.details
    }

    /// Converts the collector into a result.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] carrying every recorded detail.
    pub fn into_result(self) -> Result<(), ClientError> {
        if self.details.is_empty() {
            Ok(())
        } else {
            Err(ClientError::validation(self.details))
        }
    }
}

/// The platform set must be non-empty.
///
/// Membership in the closed set is guaranteed by [`Platform`] itself.
pub fn check_platforms(platforms: &[Platform], out: &mut Violations) {
    if platforms.is_empty() {
        out.push(
            "social_platforms",
            "too_small",
            "At least one social platform is required",
        );
    }
}

/// The query must be non-empty after trimming.
pub fn check_query(query: &str, out: &mut Violations) {
    if query.trim().is_empty() {
        out.push("query", "required", "Query must not be empty");
    }
}

/// `count` must lie in `1..=MAX_RESULT_COUNT`.
pub fn check_count(count: u32, out: &mut Violations) {
    if count < 1 {
        out.push("count", "too_small", "Count must be at least 1");
    } else if count > MAX_RESULT_COUNT {
        out.push(
            "count",
            "too_big",
            format!("Count must be at most {MAX_RESULT_COUNT}"),
        );
    }
}

/// `page` is 1-based.
pub fn check_page(page: u32, out: &mut Violations) {
    if page < 1 {
        out.push("page", "too_small", "Page must be at least 1");
    }
}

/// The URL list must hold `1..=MAX_EXTRACT_URLS` absolute URLs.
pub fn check_urls(urls: &[String], out: &mut Violations) {
    if urls.is_empty() {
        out.push("urls", "too_small", "At least one URL is required");
    } else if urls.len() > MAX_EXTRACT_URLS {
        out.push(
            "urls",
            "too_big",
            format!(
                "At most {MAX_EXTRACT_URLS} URLs are allowed, got {}",
                urls.len()
            ),
        );
    }

    for (index, candidate) in urls.iter().enumerate() {
        if !is_absolute_url(candidate) {
            out.push(
                format!("urls[{index}]"),
                "invalid_url",
                format!("'{candidate}' is not an absolute URL"),
            );
        }
    }
}

/// Returns true if `candidate` parses as an absolute URL with a host.
pub fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| url.has_host())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls() {
        assert!(is_absolute_url("https://www.reddit.com/r/rust/comments/abc"));
        assert!(is_absolute_url("http://tiktok.com/@user/video/1"));
        assert!(!is_absolute_url("/r/rust"));
        assert!(!is_absolute_url("reddit.com/r/rust"));
        assert!(!is_absolute_url(""));
        assert!(!is_absolute_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_count_bounds() {
        for (count, ok) in [(0, false), (1, true), (50, true), (100, true), (101, false)] {
            let mut v = Violations::new();
            check_count(count, &mut v);
            assert_eq!(v.is_empty(), ok, "count {count}");
        }
    }

    #[test]
    fn test_query_whitespace_only_rejected() {
        let mut v = Violations::new();
        check_query("   \t", &mut v);
        assert_eq!(v.details()[0].code, "required");
    }

    #[test]
    fn test_urls_report_every_bad_entry() {
        let urls = vec![
            "https://reddit.com/r/a".to_string(),
            "nope".to_string(),
            "also nope".to_string(),
        ];
        let mut v = Violations::new();
        check_urls(&urls, &mut v);
        let fields: Vec<_> = v.details().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["urls[1]", "urls[2]"]);
    }

    #[test]
    fn test_urls_too_many() {
        let urls = vec!["https://reddit.com/r/a".to_string(); MAX_EXTRACT_URLS + 1];
        let mut v = Violations::new();
        check_urls(&urls, &mut v);
        assert_eq!(v.details().len(), 1);
        assert_eq!(v.details()[0].code, "too_big");
    }

    #[test]
    fn test_into_result() {
        assert!(Violations::new().into_result().is_ok());

        let mut v = Violations::new();
        check_page(0, &mut v);
        let err = v.into_result().unwrap_err();
        assert_eq!(err.details()[0].field, "page");
    }
}
