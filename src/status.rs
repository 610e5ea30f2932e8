use crate::aggregate::Aggregator;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::gradient;
use crate::meter;
use crate::model::{GradientSpec, RepoStats, Segment, StatusOutput, SCHEMA_VERSION};
use crate::score::HealthPolicy;
use anyhow::Context;
use chrono::Utc;
use console::style;

/// Everything the top-level entry point delivers: the paint
/// instructions, the score, and the stats they came from.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub segments: Vec<Segment>,
    pub health: f64,
    pub stats: RepoStats,
}

/// Fetches stats capped at the healthy threshold, scores them, and
/// renders the meter.
pub async fn fetch_status(
    aggregator: &Aggregator,
    policy: &HealthPolicy,
    spec: &GradientSpec,
    repo_ref: &str,
) -> Result<StatusReport> {
    let stats = aggregator
        .fetch_stats(repo_ref, Some(policy.healthy_commits))
        .await?;
    let health = policy.score(&stats);
    let segments = gradient::render(health, spec);
    Ok(StatusReport {
        segments,
        health,
        stats,
    })
}

pub async fn exec(
    common: CommonArgs,
    repo_ref: String,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let aggregator = common.aggregator();
    let policy = common.policy();
    let spec = GradientSpec::default();

    let stats = aggregator
        .fetch_stats_with_progress(&repo_ref, Some(policy.healthy_commits), !json && !ndjson)
        .await
        .context("Failed to fetch commit statistics")?;
    let health = policy.score(&stats);
    let segments = gradient::render(health, &spec);

    if json {
        let output = StatusOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            host: common.host.clone(),
            repo_ref,
            health,
            stats,
            segments,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for segment in &segments {
            println!("{}", serde_json::to_string(segment)?);
        }
    } else {
        let score_text = format!("{health:.3}");
        let score_styled = if health >= 0.66 {
            style(score_text).green().bold()
        } else if health >= 0.33 {
            style(score_text).yellow().bold()
        } else {
            style(score_text).red().bold()
        };

        println!("{} {}", style("Project health:").bold(), repo_ref);
        println!("{}", meter::paint_bar(&segments));
        println!(
            "health: {}  commits: {}, committers: {}",
            score_styled, stats.num_commits, stats.num_committers
        );
    }

    Ok(())
}
