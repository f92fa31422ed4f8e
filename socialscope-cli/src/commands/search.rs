//! Search command - find posts across platforms.

use anyhow::Result;
use socialscope_core::SearchRequest;
use tracing::info;

use super::{SearchArgs, build_client, check_request, parse_platforms, print_output};
use crate::Cli;

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli) -> Result<()> {
    let (platforms, unknown) = parse_platforms(&args.platform);
    let request = SearchRequest::new(platforms, args.query.as_str())
        .with_count(args.count)
        .with_page(args.page);
    check_request(unknown, request.validate())?;

    let client = build_client(cli)?;
    info!(platforms = ?request.social_platforms, query = %request.query, "Searching");
    let results = client.search(&request).await?;

    print_output(cli, &client, &results, |formatter, results| {
        formatter.format_results(results)
    })
}
