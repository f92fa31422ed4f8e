//! Search-extract command - search, then extract every hit.

use anyhow::Result;
use clap::Args;
use socialscope_core::{SearchAndExtractRequest, SearchRequest};
use tracing::info;

use super::{
    ExtractOptionArgs, SearchArgs, build_client, check_request, parse_filter, parse_mode,
    parse_platforms, print_output,
};
use crate::Cli;

/// Arguments for the search-extract command.
#[derive(Args, Debug)]
pub struct SearchExtractArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub options: ExtractOptionArgs,
}

/// Runs the search-extract command.
pub async fn run(args: &SearchExtractArgs, cli: &Cli) -> Result<()> {
    let (platforms, unknown) = parse_platforms(&args.search.platform);
    let search = SearchRequest::new(platforms, args.search.query.as_str())
        .with_count(args.search.count)
        .with_page(args.search.page);

    let mut request =
        SearchAndExtractRequest::from(search).with_comments(args.options.include_comments);
    if let Some(mode) = parse_mode(args.options.mode.as_deref())? {
        request = request.with_response_mode(mode);
    }
    if let Some(filter) = parse_filter(args.options.comment_filter.as_deref())? {
        request = request.with_comment_filter(filter);
    }
    check_request(unknown, request.validate())?;

    let client = build_client(cli)?;
    info!(query = %request.query, "Searching and extracting");
    let posts = client.search_and_extract(&request).await?;

    print_output(cli, &client, &posts, |formatter, posts| {
        formatter.format_posts(posts)
    })
}
