//! Search result type.

use serde::{Deserialize, Deserializer, Serialize};

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Post title.
    pub title: String,
    /// Canonical post URL.
    pub url: String,
    /// Short text excerpt.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub snippet: String,
    /// Display date as sent by the server. Not parsed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    /// Preview image URL, empty when the hit has none.
    #[serde(default, alias = "imageUrl", deserialize_with = "null_as_empty")]
    pub image_url: String,
}

impl SearchResult {
    /// Returns true if the hit carries a preview image.
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_image_url_defaults_to_empty() {
        let result: SearchResult = serde_json::from_str(
            r#"{"title":"t","url":"https://reddit.com/r/x","snippet":"s","date":"2 days ago"}"#,
        )
        .unwrap();
        assert_eq!(result.image_url, "");
        assert!(!result.has_image());
    }

    #[test]
    fn test_null_image_url_defaults_to_empty() {
        let result: SearchResult = serde_json::from_str(
            r#"{"title":"t","url":"u","snippet":"s","date":"d","image_url":null}"#,
        )
        .unwrap();
        assert_eq!(result.image_url, "");
    }

    #[test]
    fn test_date_is_kept_verbatim() {
        let result: SearchResult = serde_json::from_str(
            r#"{"title":"t","url":"u","snippet":"s","date":"Mar 3, 2024 · 5 min","image_url":"https://i.example/p.jpg"}"#,
        )
        .unwrap();
        assert_eq!(result.date, "Mar 3, 2024 · 5 min");
        assert!(result.has_image());
    }
}
