//! Serde serialization/deserialization tests for core types.
//!
//! These tests pin the JSON shapes the API speaks: platform tags, response
//! modes, extraction items, and the leniency rules for optional fields.

use serde_json::json;

use crate::{
    ExtractRequest, ExtractedPost, Platform, RateLimitInfo, RawPayload, ResponseMode,
    SearchRequest, SearchResult,
};

// ============================================================================
// Platform Serde Tests
// ============================================================================

#[test]
fn test_platform_serde_roundtrip_all_variants() {
    for platform in Platform::all() {
        let json = serde_json::to_string(platform).unwrap();
        let deserialized: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(*platform, deserialized, "Round-trip failed for {:?}", platform);
    }
}

#[test]
fn test_platform_serializes_lowercase() {
    let test_cases = vec![
        (Platform::Reddit, r#""reddit""#),
        (Platform::Tiktok, r#""tiktok""#),
    ];

    for (platform, expected) in test_cases {
        assert_eq!(serde_json::to_string(&platform).unwrap(), expected);
    }
}

#[test]
fn test_platform_invalid_deserialize() {
    let result: Result<Platform, _> = serde_json::from_str(r#""instagram""#);
    assert!(result.is_err());
}

// ============================================================================
// Response Mode Serde Tests
// ============================================================================

#[test]
fn test_response_mode_wire_values() {
    assert_eq!(serde_json::to_string(&ResponseMode::Raw).unwrap(), r#""raw""#);
    assert_eq!(
        serde_json::to_string(&ResponseMode::Markdown).unwrap(),
        r#""markdown""#
    );
}

// ============================================================================
// Request Serde Tests
// ============================================================================

#[test]
fn test_extract_request_comment_filter_kept_verbatim() {
    let filter = json!({"max_depth": 2, "min_score": 10, "sort": "top", "extra": [1, 2]});
    let req = ExtractRequest::new(["https://www.reddit.com/r/rust/comments/1"])
        .with_comment_filter(filter.clone());

    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["comment_filter_config"], filter);

    let back: ExtractRequest = serde_json::from_value(json).unwrap();
    assert_eq!(back, req);
}

#[test]
fn test_search_request_roundtrip() {
    let req = SearchRequest::new(vec![Platform::Reddit, Platform::Tiktok], "rust async")
        .with_count(42)
        .with_page(3);
    let json = serde_json::to_string(&req).unwrap();
    let back: SearchRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, req);
}

// ============================================================================
// Response Serde Tests
// ============================================================================

#[test]
fn test_search_results_array() {
    let body = json!([
        {"title": "A", "url": "https://reddit.com/a", "snippet": "sa", "date": "1h", "image_url": "https://i/a.png"},
        {"title": "B", "url": "https://tiktok.com/b", "snippet": "sb", "date": "2h"}
    ]);
    let results: Vec<SearchResult> = serde_json::from_value(body).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].image_url, "https://i/a.png");
    assert_eq!(results[1].image_url, "");
}

#[test]
fn test_search_result_requires_url() {
    let result: Result<SearchResult, _> =
        serde_json::from_value(json!({"title": "no url", "snippet": "", "date": ""}));
    assert!(result.is_err());
}

#[test]
fn test_extracted_post_unknown_source_rejected() {
    let result: Result<ExtractedPost, _> = serde_json::from_value(json!({
        "url": "https://x.com/a/status/1",
        "source": "twitter",
        "raw": null
    }));
    assert!(result.is_err());
}

#[test]
fn test_extracted_post_error_item() {
    let post: ExtractedPost = serde_json::from_value(json!({
        "url": "https://www.tiktok.com/@gone/video/1",
        "source": "tiktok",
        "error": "Video unavailable"
    }))
    .unwrap();
    assert!(post.is_failure());
    assert!(post.raw.is_none());
    assert!(post.markdown.is_none());
}

#[test]
fn test_raw_payload_serializes_untagged() {
    let raw = json!({
        "id": "1", "username": "u", "likes": 1, "comments_count": 0, "hashtags": []
    });
    let payload = RawPayload::decode(Platform::Tiktok, &raw).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["username"], "u");
    assert!(json.get("Tiktok").is_none());
}

#[test]
fn test_rate_limit_info_roundtrip() {
    let info = RateLimitInfo {
        limit: Some(1000),
        remaining: None,
        reset: Some(1_700_000_000),
    };
    let json = serde_json::to_string(&info).unwrap();
    let back: RateLimitInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, info);
}
