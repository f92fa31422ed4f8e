//! Platform and response-mode enums.
//!
//! This module contains the two closed enumerations used by requests:
//! - [`Platform`] - Supported social platforms
//! - [`ResponseMode`] - Shape of extracted content

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationDetail;

// ============================================================================
// Platform
// ============================================================================

/// Supported social platforms.
///
/// Serialized as the lowercase tag the API uses in `social_platforms` and in
/// the `source` field of extracted posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Reddit (threads grouped by subreddit).
    Reddit,
    /// TikTok (short videos by creator handle).
    Tiktok,
}

impl Platform {
    /// Returns the display name for this platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Reddit => "Reddit",
            Self::Tiktok => "TikTok",
        }
    }

    /// Returns the wire tag for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reddit => "reddit",
            Self::Tiktok => "tiktok",
        }
    }

    /// Returns all supported platforms.
    pub fn all() -> &'static [Platform] {
        &[Self::Reddit, Self::Tiktok]
    }

    /// Parses a comma-separated platform list such as `"reddit,tiktok"`.
    ///
    /// Every unknown entry is reported, not just the first. Blank entries are
    /// skipped, so an empty string yields an empty list (emptiness is a
    /// request-level rule, see [`crate::SearchRequest::validate`]).
    ///
    /// # Errors
    ///
    /// Returns one `invalid_enum` detail per unrecognised entry.
    pub fn parse_list(input: &str) -> Result<Vec<Platform>, Vec<ValidationDetail>> {
        let (platforms, details) = Self::partition_list(input);
        if details.is_empty() {
            Ok(platforms)
        } else {
            Err(details)
        }
    }

    /// Splits a comma-separated list into recognised platforms and one
    /// `invalid_enum` detail per unknown entry.
    pub fn partition_list(input: &str) -> (Vec<Platform>, Vec<ValidationDetail>) {
        let mut platforms = Vec::new();
        let mut details = Vec::new();

        for (index, raw) in input.split(',').map(str::trim).enumerate() {
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<Platform>() {
                Ok(platform) => platforms.push(platform),
                Err(mut detail) => {
                    detail.field = format!("social_platforms[{index}]");
                    details.push(detail);
                }
            }
        }

        (platforms, details)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ValidationDetail;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reddit" => Ok(Self::Reddit),
            "tiktok" => Ok(Self::Tiktok),
            other => Err(ValidationDetail::new(
                "social_platforms",
                "invalid_enum",
                format!("Unsupported platform '{other}', expected one of: reddit, tiktok"),
            )),
        }
    }
}

// ============================================================================
// Response Mode
// ============================================================================

/// How extracted content should be returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Structured platform payload.
    #[default]
    Raw,
    /// Markdown rendering of the post.
    Markdown,
}

impl ResponseMode {
    /// Returns the wire value for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseMode {
    type Err = ValidationDetail;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(ValidationDetail::new(
                "response_mode",
                "invalid_enum",
                format!("Unsupported response mode '{other}', expected raw or markdown"),
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
