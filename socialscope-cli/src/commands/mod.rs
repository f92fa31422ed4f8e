//! CLI command implementations.

pub mod config;
pub mod extract;
pub mod search;
pub mod search_extract;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use socialscope_client::SocialScopeClient;
use socialscope_core::{ClientError, Platform, ResponseMode, ValidationDetail};
use tracing::debug;

use crate::config::{FileConfig, Overrides, resolve};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Extraction options shared by `extract` and `search-extract`.
#[derive(Args, Debug, Default)]
pub struct ExtractOptionArgs {
    /// Include the comment tree.
    #[arg(long)]
    pub include_comments: bool,

    /// Response mode: raw or markdown.
    #[arg(long, short = 'm', value_name = "MODE")]
    pub mode: Option<String>,

    /// Comment filter as a JSON object, sent verbatim.
    #[arg(long, value_name = "JSON")]
    pub comment_filter: Option<String>,
}

/// Search parameters shared by `search` and `search-extract`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Platforms to search, comma-separated (reddit, tiktok).
    #[arg(long, short, value_name = "LIST")]
    pub platform: String,

    /// Search query.
    #[arg(long, short = 'q')]
    pub query: String,

    /// Results per page (1-100).
    #[arg(long, short = 'n', default_value_t = socialscope_core::DEFAULT_RESULT_COUNT)]
    pub count: u32,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = socialscope_core::DEFAULT_PAGE)]
    pub page: u32,
}

/// Builds a client from flags, environment, and the config file.
pub fn build_client(cli: &Cli) -> Result<SocialScopeClient> {
    let path = cli.config.clone().unwrap_or_else(FileConfig::default_path);
    let file = FileConfig::load_from(&path)?;
    let overrides = Overrides {
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone(),
        timeout_ms: cli.timeout_ms,
        max_retries: cli.max_retries,
    };
    let config = resolve(&overrides, &file, |name| std::env::var(name).ok())?;
    debug!(config = ?config, "Resolved client configuration");
    Ok(SocialScopeClient::with_config(config)?)
}

/// Parses a comma-separated platform list.
///
/// Unknown entries come back as details so they can be reported alongside
/// the rest of the request's problems.
pub fn parse_platforms(raw: &str) -> (Vec<Platform>, Vec<ValidationDetail>) {
    Platform::partition_list(raw)
}

/// Reports platform-list problems together with the request's own checks.
///
/// When the list had unknown entries, the request's empty-platforms detail
/// is dropped since it only restates them.
pub fn check_request(
    platform_errors: Vec<ValidationDetail>,
    checked: Result<(), ClientError>,
) -> Result<()> {
    let had_platform_errors = !platform_errors.is_empty();
    let mut details = platform_errors;
    match checked {
        Ok(()) => {}
        Err(ClientError::Validation { details: rest, .. }) => details.extend(
            rest.into_iter()
                .filter(|d| !(had_platform_errors && d.field == "social_platforms")),
        ),
        Err(other) => return Err(other.into()),
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(ClientError::validation(details).into())
    }
}

/// Parses the `--mode` flag.
pub fn parse_mode(raw: Option<&str>) -> Result<Option<ResponseMode>> {
    raw.map(|value| {
        value
            .parse::<ResponseMode>()
            .map_err(|detail| anyhow::Error::from(ClientError::validation(vec![detail])))
    })
    .transpose()
}

/// Parses the `--comment-filter` flag.
pub fn parse_filter(raw: Option<&str>) -> Result<Option<Value>> {
    raw.map(|value| serde_json::from_str::<Value>(value).context("--comment-filter is not valid JSON"))
        .transpose()
}

/// Prints command results in the selected format.
pub fn print_output<T: Serialize>(
    cli: &Cli,
    client: &SocialScopeClient,
    results: &[T],
    render_text: impl FnOnce(&TextFormatter, &[T]) -> String,
) -> Result<()> {
    let rate_limit = cli.rate_limit.then(|| client.rate_limit_info());

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", render_text(&formatter, results));
            if let Some(info) = &rate_limit {
                println!();
                println!("{}", formatter.format_rate_limit(info));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_results(results, rate_limit.as_ref())?);
        }
    }

    Ok(())
}
