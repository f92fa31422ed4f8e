// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `SocialScope` CLI - search and extract Reddit and TikTok posts.
//!
//! # Examples
//!
//! ```bash
//! # Search Reddit and TikTok
//! socialscope search --platform reddit,tiktok --query "rust async" --count 5
//!
//! # Extract posts with their comment trees
//! socialscope extract https://www.reddit.com/r/rust/comments/abc --include-comments
//!
//! # Search, then extract every hit as markdown
//! socialscope search-extract -p tiktok -q "sourdough" --mode markdown
//!
//! # JSON output with the rate-limit window
//! socialscope search -p reddit -q rust --format json --pretty --rate-limit
//!
//! # Configuration
//! socialscope config init
//! ```

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use socialscope_core::{ClientError, ErrorKind};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::extract::ExtractArgs;
use commands::search_extract::SearchExtractArgs;
use commands::{SearchArgs, config as config_cmd, extract, search, search_extract};
use output::{JsonFormatter, TextFormatter};

// ============================================================================
// CLI Definition
// ============================================================================

/// `SocialScope` CLI - Reddit and TikTok search and extraction.
#[derive(Parser)]
#[command(name = "socialscope")]
#[command(about = "Search and extract Reddit and TikTok posts")]
#[command(long_about = r#"
SocialScope searches social platforms and extracts post content.

Supported platforms:
  • Reddit (reddit)
  • TikTok (tiktok)

The API key is read from --api-key, then SOCIALSCOPE_API_KEY, then the
config file (see `socialscope config path`).

Examples:
  socialscope search -p reddit,tiktok -q "rust async"
  socialscope extract URL... --include-comments
  socialscope search-extract -p tiktok -q cats --mode markdown
  socialscope config show
"#)]
#[command(version)]
#[command(author = "SocialScope Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging, no error text).
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print the observed rate-limit window after the call.
    #[arg(long, global = true)]
    pub rate_limit: bool,

    /// API key (overrides environment and config file).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds (0 = unlimited).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Retries after a transport failure.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Config file path.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search posts across platforms.
    #[command(visible_alias = "s")]
    Search(SearchArgs),

    /// Extract content from post URLs.
    #[command(visible_alias = "x")]
    Extract(ExtractArgs),

    /// Search, then extract every hit.
    #[command(name = "search-extract", visible_alias = "sx")]
    SearchExtract(SearchExtractArgs),

    /// Manage configuration.
    Config(config_cmd::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Input rejected.
    Validation = 2,
    /// Credential rejected or credits exhausted.
    Auth = 3,
    /// Throttled by the server.
    RateLimited = 4,
    /// Transport failure or timeout.
    Network = 5,
}

impl ExitCode {
    /// Maps a command error onto an exit code.
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ClientError>().map(ClientError::kind) {
            Some(ErrorKind::Validation) => Self::Validation,
            Some(ErrorKind::Authentication | ErrorKind::InsufficientCredits) => Self::Auth,
            Some(ErrorKind::RateLimited) => Self::RateLimited,
            Some(ErrorKind::Network | ErrorKind::Timeout) => Self::Network,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("socialscope=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Search(args) => search::run(args, &cli).await,
        Commands::Extract(args) => extract::run(args, &cli).await,
        Commands::SearchExtract(args) => search_extract::run(args, &cli).await,
        Commands::Config(args) => config_cmd::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            report_error(&e, &cli);
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}

fn report_error(err: &anyhow::Error, cli: &Cli) {
    match (cli.format, err.downcast_ref::<ClientError>()) {
        (OutputFormat::Json, Some(client_err)) => {
            match JsonFormatter::new(cli.pretty).format_error(client_err) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("Error: {client_err}"),
            }
        }
        (OutputFormat::Text, Some(client_err)) => {
            eprintln!("{}", TextFormatter::new(!cli.no_color).format_error(client_err));
        }
        (_, None) => eprintln!("Error: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "socialscope",
            "search",
            "-p",
            "reddit,tiktok",
            "-q",
            "rust",
            "-n",
            "5",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.platform, "reddit,tiktok");
                assert_eq!(args.count, 5);
                assert_eq!(args.page, 1);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_extract_requires_url() {
        assert!(Cli::try_parse_from(["socialscope", "extract"]).is_err());

        let cli = Cli::try_parse_from([
            "socialscope",
            "extract",
            "https://www.reddit.com/r/rust/comments/1",
            "--include-comments",
            "--mode",
            "markdown",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.urls.len(), 1);
                assert!(args.options.include_comments);
                assert_eq!(args.options.mode.as_deref(), Some("markdown"));
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_exit_codes() {
        let validation = anyhow::Error::from(ClientError::validation(vec![]));
        assert_eq!(ExitCode::for_error(&validation), ExitCode::Validation);

        let auth = anyhow::Error::from(ClientError::Authentication {
            message: "no".to_string(),
            request_id: None,
        });
        assert_eq!(ExitCode::for_error(&auth), ExitCode::Auth);

        let timeout = anyhow::Error::from(ClientError::Timeout {
            after: std::time::Duration::from_secs(1),
        });
        assert_eq!(ExitCode::for_error(&timeout), ExitCode::Network);

        let other = anyhow::anyhow!("disk on fire");
        assert_eq!(ExitCode::for_error(&other), ExitCode::Error);
    }
}
