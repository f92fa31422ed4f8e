//! Extract command - pull content from known post URLs.

use anyhow::Result;
use clap::Args;
use socialscope_core::ExtractRequest;
use tracing::info;

use super::{ExtractOptionArgs, build_client, parse_filter, parse_mode, print_output};
use crate::Cli;

/// Arguments for the extract command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Post URLs (Reddit or TikTok).
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    #[command(flatten)]
    pub options: ExtractOptionArgs,
}

/// Runs the extract command.
pub async fn run(args: &ExtractArgs, cli: &Cli) -> Result<()> {
    let mut request =
        ExtractRequest::new(args.urls.iter().cloned()).with_comments(args.options.include_comments);
    if let Some(mode) = parse_mode(args.options.mode.as_deref())? {
        request = request.with_response_mode(mode);
    }
    if let Some(filter) = parse_filter(args.options.comment_filter.as_deref())? {
        request = request.with_comment_filter(filter);
    }

    let client = build_client(cli)?;
    info!(urls = request.urls.len(), "Extracting");
    let posts = client.extract(&request).await?;

    print_output(cli, &client, &posts, |formatter, posts| {
        formatter.format_posts(posts)
    })
}
