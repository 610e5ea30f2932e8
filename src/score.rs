use crate::aggregate::Aggregator;
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::model::RepoStats;
use anyhow::Context;

/// How many commits inside the recency window count as fully healthy.
#[derive(Debug, Clone, Copy)]
pub struct HealthPolicy {
    pub healthy_commits: u64,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self { healthy_commits: 15 }
    }
}

impl HealthPolicy {
    /// Saturating linear map from commit count to [0, 1].
    pub fn score(&self, stats: &RepoStats) -> f64 {
        (stats.num_commits as f64 / self.healthy_commits as f64).min(1.0)
    }
}

/// Aggregates `repo_ref` and scores the result.
pub async fn score_repo(
    aggregator: &Aggregator,
    policy: &HealthPolicy,
    repo_ref: &str,
) -> Result<f64> {
    let stats = aggregator.fetch_stats(repo_ref, None).await?;
    Ok(policy.score(&stats))
}

pub async fn exec(
    common: CommonArgs,
    repo_ref: Option<String>,
    commits: Option<u64>,
) -> anyhow::Result<()> {
    let policy = common.policy();

    let health = match (repo_ref, commits) {
        (_, Some(num_commits)) => policy.score(&RepoStats {
            num_commits,
            num_committers: 0,
        }),
        (Some(repo_ref), None) => score_repo(&common.aggregator(), &policy, &repo_ref)
            .await
            .context("Failed to compute health")?,
        (None, None) => anyhow::bail!("a repository reference or --commits is required"),
    };

    println!("{health:.3}");
    Ok(())
}
