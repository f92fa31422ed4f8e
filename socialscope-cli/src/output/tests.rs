//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{TextFormatter, format_count, format_reset_time};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use socialscope_core::{
        ClientError, ExtractedPost, Platform, RateLimitInfo, SearchResult, ValidationDetail,
    };

    fn result(title: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: format!("https://reddit.com/r/rust/{title}"),
            snippet: "A snippet".to_string(),
            date: "2 hours ago".to_string(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_format_count() {
        let test_cases: Vec<(i64, &str)> = vec![
            (0, "0"),
            (950, "950"),
            (1_234, "1.2K"),
            (3_450_000, "3.4M"),
            (-12, "-12"),
        ];

        for (n, expected) in test_cases {
            assert_eq!(format_count(n), expected, "Failed for {n}");
        }
    }

    #[test]
    fn test_results_are_numbered() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_results(&[result("first"), result("second")]);

        assert!(output.contains(" 1. first"));
        assert!(output.contains(" 2. second"));
        assert!(output.contains("https://reddit.com/r/rust/first"));
        assert!(output.contains("2 hours ago"));
    }

    #[test]
    fn test_empty_results() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_results(&[]), "No results");
        assert_eq!(formatter.format_posts(&[]), "No posts");
    }

    #[test]
    fn test_long_snippet_is_truncated() {
        let formatter = TextFormatter::new(false);
        let mut long = result("long");
        long.snippet = "word ".repeat(100);
        let output = formatter.format_result(1, &long);
        assert!(output.contains('…'));
    }

    #[test]
    fn test_reddit_post_summary() {
        let formatter = TextFormatter::new(false);
        let post = ExtractedPost {
            url: "https://www.reddit.com/r/rust/comments/1".to_string(),
            source: Platform::Reddit,
            raw: Some(json!({
                "subreddit": "rust", "title": "Async traits", "author": "ferris",
                "upvotes": 1500, "downvotes": 20, "score": 1480, "comments_count": 42,
                "comments": [{"id": "a", "body": "x", "replies": [{"id": "b", "body": "y"}]}]
            })),
            markdown: None,
            error: None,
        };

        let output = formatter.format_post(&post);
        assert!(output.starts_with("[Reddit] https://www.reddit.com/r/rust/comments/1"));
        assert!(output.contains("r/rust · u/ferris · 1.5K ▲ 20 ▼ · score 1.4K"));
        assert!(output.contains("42 comments (2 included, 1 top-level, depth 2)"));
    }

    #[test]
    fn test_tiktok_post_summary() {
        let formatter = TextFormatter::new(false);
        let post = ExtractedPost {
            url: "https://www.tiktok.com/@chef/video/7".to_string(),
            source: Platform::Tiktok,
            raw: Some(json!({
                "id": "7", "username": "chef", "description": "pasta",
                "likes": 12000, "views": 99, "hashtags": ["food", "pasta"]
            })),
            markdown: None,
            error: None,
        };

        let output = formatter.format_post(&post);
        assert!(output.contains("@chef · ♥ 12.0K ▶ 99"));
        assert!(output.contains("#food #pasta"));
        assert!(output.contains("0 comments"));
    }

    #[test]
    fn test_failed_and_empty_posts() {
        let formatter = TextFormatter::new(false);
        let mut post = ExtractedPost {
            url: "https://www.tiktok.com/@gone/video/1".to_string(),
            source: Platform::Tiktok,
            raw: None,
            markdown: None,
            error: Some("Video unavailable".to_string()),
        };
        assert!(formatter.format_post(&post).contains("Error: Video unavailable"));

        post.error = None;
        assert!(formatter.format_post(&post).contains("(no content)"));
    }

    #[test]
    fn test_mismatched_payload_is_reported_not_fatal() {
        let formatter = TextFormatter::new(false);
        let post = ExtractedPost {
            url: "https://www.reddit.com/r/rust/comments/2".to_string(),
            source: Platform::Reddit,
            raw: Some(json!({"id": "1", "username": "looks_like_tiktok"})),
            markdown: Some("# still rendered".to_string()),
            error: None,
        };
        let output = formatter.format_post(&post);
        assert!(output.contains("Unrecognised payload"));
        assert!(output.contains("# still rendered"));
    }

    #[test]
    fn test_rate_limit_line() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_rate_limit(&RateLimitInfo::default()),
            "Rate limit: not reported"
        );

        let info = RateLimitInfo {
            limit: Some(1000),
            remaining: Some(150),
            reset: None,
        };
        assert_eq!(formatter.format_rate_limit(&info), "Rate limit: 150/1000 left");
    }

    #[test]
    fn test_rate_limit_colors() {
        let formatter = TextFormatter::new(true);
        let low = RateLimitInfo {
            limit: Some(100),
            remaining: Some(5),
            reset: None,
        };
        assert!(formatter.format_rate_limit(&low).contains("\x1b[31m"));
    }

    #[test]
    fn test_reset_time_relative() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_reset_time(now, now), "now");
        assert_eq!(format_reset_time(now + Duration::seconds(30), now), "in 30 seconds");
        assert_eq!(format_reset_time(now + Duration::minutes(1), now), "in 1 minute");
        assert_eq!(format_reset_time(now + Duration::minutes(90), now), "in 1h 30m");
        assert_eq!(format_reset_time(now + Duration::hours(2), now), "in 2 hours");
    }

    #[test]
    fn test_validation_error_lists_details() {
        let formatter = TextFormatter::new(false);
        let err = ClientError::validation(vec![
            ValidationDetail::new("count", "too_big", "Count must be at most 100"),
            ValidationDetail::new("page", "too_small", "Page must be at least 1"),
        ]);
        let output = formatter.format_error(&err);
        assert!(output.starts_with("Error: Validation failed"));
        assert!(output.contains("  • count (too_big): Count must be at most 100"));
        assert!(output.contains("  • page (too_small)"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{JsonFormatter, kind_name};
    use serde_json::{Value, json};
    use socialscope_core::{ClientError, ErrorKind, RateLimitInfo, SearchResult};

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&json!({"a": 1})).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format(&json!({"a": 1})).unwrap();
        assert_eq!(output, r#"{"a":1}"#);
    }

    #[test]
    fn test_results_envelope() {
        let formatter = JsonFormatter::new(false);
        let results = vec![SearchResult {
            title: "t".to_string(),
            url: "https://reddit.com/t".to_string(),
            snippet: String::new(),
            date: String::new(),
            image_url: String::new(),
        }];

        let output: Value =
            serde_json::from_str(&formatter.format_results(&results, None).unwrap()).unwrap();
        assert_eq!(output["results"][0]["url"], "https://reddit.com/t");
        assert!(output.get("rateLimit").is_none());

        let info = RateLimitInfo {
            limit: Some(1000),
            remaining: Some(150),
            reset: Some(0),
        };
        let output: Value =
            serde_json::from_str(&formatter.format_results(&results, Some(&info)).unwrap())
                .unwrap();
        assert_eq!(output["rateLimit"]["remaining"], 150);
        assert_eq!(output["rateLimit"]["resetsAt"], "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_error_output() {
        let formatter = JsonFormatter::new(false);
        let err = ClientError::RateLimited {
            message: "slow down".to_string(),
            retry_after: Some(60),
            request_id: Some("req_9".to_string()),
        };

        let output: Value = serde_json::from_str(&formatter.format_error(&err).unwrap()).unwrap();
        assert_eq!(output["error"], "rate_limited");
        assert_eq!(output["status"], 429);
        assert_eq!(output["retryAfter"], 60);
        assert_eq!(output["requestId"], "req_9");
        assert!(output.get("details").is_none());
    }

    #[test]
    fn test_kind_names_are_unique() {
        let kinds = [
            ErrorKind::Validation,
            ErrorKind::Authentication,
            ErrorKind::InsufficientCredits,
            ErrorKind::RateLimited,
            ErrorKind::Api,
            ErrorKind::Network,
            ErrorKind::Timeout,
            ErrorKind::InvalidConfig,
            ErrorKind::Json,
        ];
        let mut names: Vec<_> = kinds.iter().map(|k| kind_name(*k)).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), kinds.len());
    }
}
