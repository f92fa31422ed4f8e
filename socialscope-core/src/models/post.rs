//! Extracted posts and platform payloads.
//!
//! This module contains:
//! - [`ExtractedPost`] - One extraction result, tagged with its platform
//! - [`RawPayload`] - Typed view of the raw payload, selected by the tag
//! - [`RedditPost`] / [`TiktokPost`] - Platform payload shapes
//! - [`is_reddit_payload`] / [`is_tiktok_payload`] - Structural checks that
//!   ignore the tag entirely
//!
//! The raw payload is stored as opaque JSON. Decoding into a typed payload is
//! driven by the server's `source` tag and happens only when asked for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::platform::Platform;
use crate::error::ClientError;
use crate::json;

// ============================================================================
// Extracted Post
// ============================================================================

/// One extraction result.
///
/// Normally either `raw`/`markdown` or `error` is set. The server may also
/// return an item with everything `null` (nothing could be extracted); that
/// is not treated as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPost {
    /// URL the content was extracted from.
    pub url: String,
    /// Platform tag as reported by the server.
    pub source: Platform,
    /// Platform-specific payload, kept as received.
    #[serde(default)]
    pub raw: Option<Value>,
    /// Markdown rendering of the post.
    #[serde(default)]
    pub markdown: Option<String>,
    /// Per-item failure reported by the server.
    #[serde(default)]
    pub error: Option<String>,
}

impl ExtractedPost {
    /// Returns true if the item carries content and no error.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (self.raw.is_some() || self.markdown.is_some())
    }

    /// Returns true if the server reported a per-item failure.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if every optional field is `null`.
    pub fn is_empty(&self) -> bool {
        self.raw.is_none() && self.markdown.is_none() && self.error.is_none()
    }

    /// Decodes the raw payload into the shape named by `source`.
    ///
    /// Returns `Ok(None)` when there is no raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Json`] if the payload does not match the shape
    /// its tag promises.
    pub fn payload(&self) -> Result<Option<RawPayload>, ClientError> {
        match &self.raw {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => Ok(Some(RawPayload::decode(self.source, raw)?)),
        }
    }
}

// ============================================================================
// Raw Payload
// ============================================================================

/// Typed platform payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawPayload {
    /// Reddit submission.
    Reddit(RedditPost),
    /// TikTok video.
    Tiktok(TiktokPost),
}

impl RawPayload {
    /// Decodes `raw` as the payload shape of `platform`.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the JSON does not fit the shape.
    pub fn decode(platform: Platform, raw: &Value) -> Result<Self, serde_json::Error> {
        match platform {
            Platform::Reddit => json::from_value_ref::<RedditPost>(raw).map(Self::Reddit),
            Platform::Tiktok => json::from_value_ref::<TiktokPost>(raw).map(Self::Tiktok),
        }
    }

    /// Returns the platform this payload belongs to.
    pub fn platform(&self) -> Platform {
        match self {
            Self::Reddit(_) => Platform::Reddit,
            Self::Tiktok(_) => Platform::Tiktok,
        }
    }

    /// Returns the number of comments and replies included in the payload.
    pub fn included_comments(&self) -> usize {
        match self {
            Self::Reddit(post) => count_comments(&post.comments),
            Self::Tiktok(post) => count_comments(&post.comments),
        }
    }
}

/// Returns true if `value` looks like a Reddit payload.
///
/// Checks structure only: a JSON object with a `subreddit` field.
pub fn is_reddit_payload(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("subreddit"))
}

/// Returns true if `value` looks like a TikTok payload.
///
/// Checks structure only: a JSON object with both `username` and `id`.
pub fn is_tiktok_payload(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("username") && obj.contains_key("id"))
}

// ============================================================================
// Reddit
// ============================================================================

/// A Reddit submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditPost {
    /// Submission id.
    #[serde(default)]
    pub id: String,
    /// Subreddit name, without the `r/` prefix.
    pub subreddit: String,
    /// Submission title.
    #[serde(default)]
    pub title: String,
    /// Author username.
    #[serde(default)]
    pub author: String,
    /// Self-text body (empty for link posts).
    #[serde(default, alias = "selftext")]
    pub body: String,
    /// Permalink or link target.
    #[serde(default)]
    pub url: String,
    /// Upvote count.
    pub upvotes: i64,
    /// Downvote count.
    pub downvotes: i64,
    /// Net score.
    pub score: i64,
    /// Total comments on the thread (not just those included).
    #[serde(default, alias = "num_comments")]
    pub comments_count: u64,
    /// Creation time (RFC 3339 or epoch seconds).
    #[serde(default, deserialize_with = "string_or_number")]
    pub created_at: Option<String>,
    /// Included comments, in server order.
    #[serde(default)]
    pub comments: Vec<RedditComment>,
}

impl RedditPost {
    /// Returns the creation time, if it parses.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// A Reddit comment with its replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditComment {
    /// Comment id.
    #[serde(default)]
    pub id: String,
    /// Author username.
    #[serde(default)]
    pub author: String,
    /// Comment text.
    #[serde(default, alias = "text")]
    pub body: String,
    /// Net score.
    #[serde(default)]
    pub score: i64,
    /// Creation time (RFC 3339 or epoch seconds).
    #[serde(default, deserialize_with = "string_or_number")]
    pub created_at: Option<String>,
    /// Direct replies.
    #[serde(default)]
    pub replies: Vec<RedditComment>,
}

impl RedditComment {
    /// Returns the creation time, if it parses.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

// ============================================================================
// TikTok
// ============================================================================

/// A TikTok video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiktokPost {
    /// Video id.
    pub id: String,
    /// Creator handle.
    pub username: String,
    /// Caption text.
    #[serde(default, alias = "desc", alias = "text")]
    pub description: String,
    /// Video URL.
    #[serde(default)]
    pub url: String,
    /// Like count.
    #[serde(default)]
    pub likes: u64,
    /// Total comments on the video (not just those included).
    #[serde(default, alias = "total_comments")]
    pub comments_count: u64,
    /// Share count, when reported.
    #[serde(default)]
    pub shares: Option<u64>,
    /// View count, when reported.
    #[serde(default)]
    pub views: Option<u64>,
    /// Hashtags without the leading `#`.
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Creation time (RFC 3339 or epoch seconds).
    #[serde(default, deserialize_with = "string_or_number")]
    pub created_at: Option<String>,
    /// Included comments, in server order.
    #[serde(default)]
    pub comments: Vec<TiktokComment>,
}

impl TiktokPost {
    /// Returns the creation time, if it parses.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// A TikTok comment with its replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiktokComment {
    /// Comment id.
    #[serde(default)]
    pub id: String,
    /// Commenter handle.
    #[serde(default, alias = "username")]
    pub author: String,
    /// Comment text.
    #[serde(default)]
    pub text: String,
    /// Like count.
    #[serde(default)]
    pub likes: u64,
    /// Creation time (RFC 3339 or epoch seconds).
    #[serde(default, deserialize_with = "string_or_number")]
    pub created_at: Option<String>,
    /// Direct replies.
    #[serde(default)]
    pub replies: Vec<TiktokComment>,
}

// ============================================================================
// Comment Trees
// ============================================================================

/// A comment that may carry nested replies.
pub trait Threaded: Sized {
    /// Direct replies to this comment.
    fn replies(&self) -> &[Self];
}

impl Threaded for RedditComment {
    fn replies(&self) -> &[Self] {
        &self.replies
    }
}

impl Threaded for TiktokComment {
    fn replies(&self) -> &[Self] {
        &self.replies
    }
}

/// Counts comments and all nested replies.
pub fn count_comments<C: Threaded>(comments: &[C]) -> usize {
    let mut stack: Vec<&C> = comments.iter().collect();
    let mut total = 0;
    while let Some(comment) = stack.pop() {
        total += 1;
        stack.extend(comment.replies());
    }
    total
}

/// Returns the deepest reply level (0 for no comments, 1 for top-level only).
pub fn thread_depth<C: Threaded>(comments: &[C]) -> usize {
    let mut stack: Vec<(&C, usize)> = comments.iter().map(|c| (c, 1)).collect();
    let mut deepest = 0;
    while let Some((comment, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(comment.replies().iter().map(|r| (r, depth + 1)));
    }
    deepest
}

// ============================================================================
// Helpers
// ============================================================================

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parses RFC 3339 or (fractional) epoch seconds.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(secs) = raw.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation)]
        return DateTime::from_timestamp(secs.trunc() as i64, 0);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reddit_raw() -> Value {
        json!({
            "id": "t3_abc",
            "subreddit": "rust",
            "title": "Async closures stabilised",
            "author": "ferris",
            "selftext": "Finally.",
            "upvotes": 120,
            "downvotes": 4,
            "score": 116,
            "num_comments": 3,
            "created_at": 1_700_000_000,
            "comments": [
                {"id": "c1", "author": "a", "body": "nice", "score": 10, "replies": [
                    {"id": "c2", "author": "b", "text": "agreed", "score": 2, "replies": [
                        {"id": "c3", "author": "c", "body": "+1", "score": 1}
                    ]}
                ]}
            ]
        })
    }

    fn tiktok_raw() -> Value {
        json!({
            "id": "7300000000000000000",
            "username": "chef.lina",
            "desc": "3 minute pasta",
            "likes": 5400,
            "comments_count": 2,
            "hashtags": ["pasta", "quickrecipe"],
            "created_at": "2024-05-01T12:00:00Z",
            "comments": [
                {"id": "x", "username": "fan1", "text": "making this tonight", "likes": 12}
            ]
        })
    }

    #[test]
    fn test_reddit_predicates() {
        let raw = reddit_raw();
        assert!(is_reddit_payload(&raw));
        assert!(!is_tiktok_payload(&raw));
    }

    #[test]
    fn test_tiktok_predicates() {
        let raw = tiktok_raw();
        assert!(is_tiktok_payload(&raw));
        assert!(!is_reddit_payload(&raw));
    }

    #[test]
    fn test_predicates_on_non_objects() {
        for value in [json!(null), json!(1), json!("subreddit"), json!(true), json!(["subreddit"])] {
            assert!(!is_reddit_payload(&value));
            assert!(!is_tiktok_payload(&value));
        }
    }

    #[test]
    fn test_tiktok_predicate_needs_both_fields() {
        assert!(!is_tiktok_payload(&json!({"username": "x"})));
        assert!(!is_tiktok_payload(&json!({"id": "1"})));
    }

    #[test]
    fn test_payload_decoded_by_tag() {
        let post = ExtractedPost {
            url: "https://www.reddit.com/r/rust/comments/abc".to_string(),
            source: Platform::Reddit,
            raw: Some(reddit_raw()),
            markdown: Some("# Async closures stabilised".to_string()),
            error: None,
        };
        assert!(post.is_success());

        let Some(RawPayload::Reddit(reddit)) = post.payload().unwrap() else {
            panic!("expected a Reddit payload");
        };
        assert_eq!(reddit.subreddit, "rust");
        assert_eq!(reddit.body, "Finally.");
        assert_eq!(reddit.comments_count, 3);
        assert_eq!(reddit.created_at.as_deref(), Some("1700000000"));
        assert_eq!(reddit.created_at_utc().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_tag_mismatch_is_a_decode_error_not_a_panic() {
        let post = ExtractedPost {
            url: "https://www.tiktok.com/@chef.lina/video/1".to_string(),
            source: Platform::Reddit,
            raw: Some(tiktok_raw()),
            markdown: None,
            error: None,
        };
        assert!(post.payload().is_err());
    }

    #[test]
    fn test_all_null_item() {
        let post: ExtractedPost = serde_json::from_value(json!({
            "url": "https://www.reddit.com/r/rust/comments/gone",
            "source": "reddit",
            "raw": null,
            "markdown": null,
            "error": null
        }))
        .unwrap();
        assert!(post.is_empty());
        assert!(!post.is_success());
        assert!(post.payload().unwrap().is_none());
    }

    #[test]
    fn test_comment_tree_helpers() {
        let RawPayload::Reddit(post) = RawPayload::decode(Platform::Reddit, &reddit_raw()).unwrap()
        else {
            panic!("expected Reddit");
        };
        assert_eq!(count_comments(&post.comments), 3);
        assert_eq!(thread_depth(&post.comments), 3);
        assert_eq!(post.comments[0].replies[0].body, "agreed");
    }

    #[test]
    fn test_tiktok_decode() {
        let payload = RawPayload::decode(Platform::Tiktok, &tiktok_raw()).unwrap();
        assert_eq!(payload.platform(), Platform::Tiktok);
        assert_eq!(payload.included_comments(), 1);

        let RawPayload::Tiktok(video) = payload else {
            panic!("expected TikTok");
        };
        assert_eq!(video.description, "3 minute pasta");
        assert_eq!(video.hashtags, vec!["pasta", "quickrecipe"]);
        assert_eq!(video.comments[0].author, "fan1");
        assert!(video.created_at_utc().is_some());
    }

    #[test]
    fn test_empty_thread_depth() {
        assert_eq!(thread_depth::<RedditComment>(&[]), 0);
        assert_eq!(count_comments::<TiktokComment>(&[]), 0);
    }
}
