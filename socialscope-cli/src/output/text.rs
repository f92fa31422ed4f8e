//! Text output formatting with colors.

use chrono::{DateTime, Duration, Local, Utc};
use socialscope_core::{
    ClientError, ExtractedPost, RateLimitInfo, RawPayload, RedditPost, SearchResult, TiktokPost,
    count_comments, thread_depth,
};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Snippets longer than this are cut.
const SNIPPET_WIDTH: usize = 160;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    snippet_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            snippet_width: SNIPPET_WIDTH,
        }
    }

    /// Formats a list of search hits.
    pub fn format_results(&self, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return self.dim("No results");
        }

        results
            .iter()
            .enumerate()
            .map(|(index, result)| self.format_result(index + 1, result))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Formats a single search hit.
    pub fn format_result(&self, position: usize, result: &SearchResult) -> String {
        let mut lines = vec![
            format!("{:>2}. {}", position, self.bold(&result.title)),
            format!("    {}", self.cyan(&result.url)),
        ];
        if !result.snippet.is_empty() {
            lines.push(format!("    {}", self.truncate(&result.snippet)));
        }
        if !result.date.is_empty() {
            lines.push(format!("    {}", self.dim(&result.date)));
        }
        lines.join("\n")
    }

    /// Formats a list of extracted posts.
    pub fn format_posts(&self, posts: &[ExtractedPost]) -> String {
        if posts.is_empty() {
            return self.dim("No posts");
        }

        posts
            .iter()
            .map(|post| self.format_post(post))
            .collect::<Vec<_>>()
            .join(&format!("\n{}\n", "─".repeat(40)))
    }

    /// Formats one extracted post.
    pub fn format_post(&self, post: &ExtractedPost) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.bold(&format!("[{}]", post.source.display_name())),
            self.cyan(&post.url)
        )];

        if let Some(error) = &post.error {
            lines.push(format!("{}: {}", self.red("Error"), error));
            return lines.join("\n");
        }
        if post.is_empty() {
            lines.push(self.dim("(no content)"));
            return lines.join("\n");
        }

        match post.payload() {
            Ok(Some(RawPayload::Reddit(reddit))) => lines.extend(self.reddit_lines(&reddit)),
            Ok(Some(RawPayload::Tiktok(tiktok))) => lines.extend(self.tiktok_lines(&tiktok)),
            Ok(None) => {}
            Err(e) => lines.push(self.yellow(&format!("Unrecognised payload: {e}"))),
        }

        if let Some(markdown) = &post.markdown {
            lines.push(String::new());
            lines.push(markdown.trim_end().to_string());
        }

        lines.join("\n")
    }

    fn reddit_lines(&self, post: &RedditPost) -> Vec<String> {
        let mut lines = Vec::new();
        if !post.title.is_empty() {
            lines.push(self.bold(&post.title));
        }
        let author = if post.author.is_empty() {
            String::new()
        } else {
            format!(" · u/{}", post.author)
        };
        lines.push(format!(
            "r/{}{} · {} ▲ {} ▼ · score {}",
            post.subreddit,
            author,
            self.green(&format_count(post.upvotes)),
            self.red(&format_count(post.downvotes)),
            format_count(post.score)
        ));
        lines.push(self.comment_summary(
            post.comments_count,
            post.comments.len(),
            count_comments(&post.comments),
            thread_depth(&post.comments),
        ));
        if !post.body.is_empty() {
            lines.push(self.truncate(&post.body));
        }
        lines
    }

    fn tiktok_lines(&self, post: &TiktokPost) -> Vec<String> {
        let mut lines = Vec::new();
        let mut stats = vec![format!("♥ {}", format_count(post.likes))];
        if let Some(views) = post.views {
            stats.push(format!("▶ {}", format_count(views)));
        }
        if let Some(shares) = post.shares {
            stats.push(format!("↗ {}", format_count(shares)));
        }
        lines.push(format!("@{} · {}", post.username, stats.join(" ")));
        if !post.description.is_empty() {
            lines.push(self.truncate(&post.description));
        }
        if !post.hashtags.is_empty() {
            let tags: Vec<String> = post.hashtags.iter().map(|t| format!("#{t}")).collect();
            lines.push(self.blue(&tags.join(" ")));
        }
        lines.push(self.comment_summary(
            post.comments_count,
            post.comments.len(),
            count_comments(&post.comments),
            thread_depth(&post.comments),
        ));
        lines
    }

    fn comment_summary(&self, total: u64, top_level: usize, included: usize, depth: usize) -> String {
        if included == 0 {
            return self.dim(&format!("{} comments", format_count(total)));
        }
        self.dim(&format!(
            "{} comments ({included} included, {top_level} top-level, depth {depth})",
            format_count(total)
        ))
    }

    /// Formats the observed rate-limit window.
    pub fn format_rate_limit(&self, info: &RateLimitInfo) -> String {
        if info.is_empty() {
            return self.dim("Rate limit: not reported");
        }

        let remaining = match (info.remaining, info.limit) {
            (Some(remaining), Some(limit)) => {
                self.color_for_remaining(remaining, limit, &format!("{remaining}/{limit} left"))
            }
            (Some(remaining), None) => format!("{remaining} left"),
            (None, Some(limit)) => format!("limit {limit}"),
            (None, None) => "unknown".to_string(),
        };

        match info.reset_at() {
            Some(reset) => format!(
                "Rate limit: {} · resets {}",
                remaining,
                self.dim(&format_reset_time(reset, Utc::now()))
            ),
            None => format!("Rate limit: {remaining}"),
        }
    }

    /// Formats a client error.
    pub fn format_error(&self, err: &ClientError) -> String {
        let mut lines = vec![format!("{}: {}", self.red("Error"), err)];
        for detail in err.details() {
            lines.push(format!(
                "  • {} {}: {}",
                self.bold(&detail.field),
                self.dim(&format!("({})", detail.code)),
                detail.message
            ));
        }
        if let Some(request_id) = err.request_id() {
            lines.push(self.dim(&format!("  request id: {request_id}")));
        }
        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn truncate(&self, text: &str) -> String {
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= self.snippet_width {
            return flat;
        }
        let cut: String = flat.chars().take(self.snippet_width).collect();
        format!("{}…", cut.trim_end())
    }

    fn color_for_remaining(&self, remaining: u64, limit: u64, text: &str) -> String {
        if !self.use_colors || limit == 0 {
            return text.to_string();
        }

        let percent = remaining.saturating_mul(100) / limit;
        if percent < 20 {
            self.red(text)
        } else if percent < 50 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Formats a count compactly: 950, 1.2K, 3.4M.
pub fn format_count<N: Into<i128>>(n: N) -> String {
    let n: i128 = n.into();
    let abs = n.unsigned_abs();
    let sign = if n < 0 { "-" } else { "" };
    if abs >= 1_000_000 {
        format!("{sign}{}.{}M", abs / 1_000_000, (abs % 1_000_000) / 100_000)
    } else if abs >= 1_000 {
        format!("{sign}{}.{}K", abs / 1_000, (abs % 1_000) / 100)
    } else {
        format!("{sign}{abs}")
    }
}

/// Formats a reset time relative to `now`.
pub fn format_reset_time(resets_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if resets_at <= now {
        return "now".to_string();
    }

    let diff = resets_at - now;
    if diff < Duration::minutes(1) {
        let secs = diff.num_seconds();
        format!("in {} second{}", secs, if secs == 1 { "" } else { "s" })
    } else if diff < Duration::hours(1) {
        let mins = diff.num_minutes();
        format!("in {} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else if diff < Duration::hours(24) {
        let hours = diff.num_hours();
        let mins = diff.num_minutes() % 60;
        if mins > 0 {
            format!("in {hours}h {mins}m")
        } else {
            format!("in {} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        let local = resets_at.with_timezone(&Local);
        local
            .format("%a %b %e at %l:%M %p")
            .to_string()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
