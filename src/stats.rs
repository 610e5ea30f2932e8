use crate::cli::CommonArgs;
use crate::model::{StatsOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub async fn exec(
    common: CommonArgs,
    repo_ref: String,
    limit: Option<u64>,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let aggregator = common.aggregator();
    let stats = aggregator
        .fetch_stats_with_progress(&repo_ref, limit, !json && !ndjson)
        .await
        .context("Failed to fetch commit statistics")?;

    if json {
        let output = StatsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            host: common.host.clone(),
            repo_ref,
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        println!("{} {}", style("Repository:").bold(), repo_ref);
        println!("  commits:    {:>6}", stats.num_commits);
        println!("  committers: {:>6}", stats.num_committers);
    }

    Ok(())
}
