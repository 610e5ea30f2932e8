use crate::error::{PulseError, Result};
use crate::model::{CommitPage, RepoStats};
use crate::remote::RemoteClient;
use crate::util::parse_authored_date;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::time::Duration;

/// Tuning for aggregation runs. Built once and injected; never mutated
/// afterwards.
#[derive(Debug, Clone, Copy)]
pub struct AggregatorConfig {
    /// Commits authored before now minus this many days end the run.
    pub window_days: i64,
    /// Pause between successive page requests.
    pub page_delay: Duration,
    /// How long to wait for a page response before treating the remote
    /// as gone.
    pub page_timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            page_delay: Duration::from_millis(500),
            page_timeout: Duration::from_secs(5),
        }
    }
}

/// Why a run stopped paging. Logged only; callers always get
/// best-effort stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    ExhaustedHistory,
    StaleCommit,
    UnparseableDate,
    LimitReached,
}

enum PageOutcome {
    Continue,
    Stop(StopReason),
}

/// Counters owned by a single in-flight run.
struct AggregationState {
    page_index: u32,
    num_commits: u64,
    authors: HashSet<String>,
}

impl AggregationState {
    fn new() -> Self {
        Self {
            page_index: 1,
            num_commits: 0,
            authors: HashSet::new(),
        }
    }

    /// Folds one page into the counters and reports whether to keep
    /// paging.
    ///
    /// The first page only bootstraps paging: its commits are never
    /// counted and none of the stop checks apply to it.
    fn ingest(&mut self, page: &CommitPage, cutoff: NaiveDate, limit: Option<u64>) -> PageOutcome {
        if self.page_index == 1 {
            return PageOutcome::Continue;
        }

        if page.commits.is_empty() {
            return PageOutcome::Stop(StopReason::ExhaustedHistory);
        }

        let mut limit_hit = false;
        for commit in &page.commits {
            let Some(date) = parse_authored_date(&commit.authored_date) else {
                return PageOutcome::Stop(StopReason::UnparseableDate);
            };
            if date < cutoff {
                return PageOutcome::Stop(StopReason::StaleCommit);
            }

            self.num_commits += 1;
            self.authors.insert(commit.author.clone());

            // The cap is soft: the rest of the page is still counted.
            if limit.is_some_and(|cap| self.num_commits > cap) {
                limit_hit = true;
            }
        }

        if limit_hit {
            PageOutcome::Stop(StopReason::LimitReached)
        } else {
            PageOutcome::Continue
        }
    }

    fn finish(self) -> RepoStats {
        RepoStats {
            num_commits: self.num_commits,
            num_committers: self.authors.len() as u64,
        }
    }
}

pub struct Aggregator {
    client: RemoteClient,
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(client: RemoteClient, config: AggregatorConfig) -> Self {
        Self { client, config }
    }

    pub fn host(&self) -> &str {
        self.client.host()
    }

    /// Pages through the commit list for `repo_ref`, counting commits
    /// and distinct authors inside the recency window.
    ///
    /// `limit` is a soft cap on the count: the run stops after the page
    /// on which the count first exceeds it. Transport failures,
    /// timeouts, and malformed data never surface here; they end the
    /// run with whatever has been counted so far.
    pub async fn fetch_stats(&self, repo_ref: &str, limit: Option<u64>) -> Result<RepoStats> {
        self.fetch_stats_with_progress(repo_ref, limit, false).await
    }

    pub async fn fetch_stats_with_progress(
        &self,
        repo_ref: &str,
        limit: Option<u64>,
        progress: bool,
    ) -> Result<RepoStats> {
        if repo_ref.is_empty() {
            return Err(PulseError::InvalidRef(
                "repository reference is empty".to_string(),
            ));
        }

        let cutoff = (Utc::now() - ChronoDuration::days(self.config.window_days)).date_naive();
        let mut state = AggregationState::new();

        let pb = if progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            Some(pb)
        } else {
            None
        };

        loop {
            if state.page_index > 1 {
                tokio::time::sleep(self.config.page_delay).await;
            }
            if let Some(pb) = &pb {
                pb.set_message(format!("Fetching page {}...", state.page_index));
            }

            // The response races the timeout; whichever resolves first
            // wins and the loser is dropped.
            let page = match tokio::time::timeout(
                self.config.page_timeout,
                self.client.fetch_page(repo_ref, state.page_index),
            )
            .await
            {
                Ok(Ok(page)) => page,
                Ok(Err(err)) => {
                    tracing::debug!(page = state.page_index, %err, "transport failure, finishing early");
                    break;
                }
                Err(_) => {
                    tracing::debug!(page = state.page_index, "page response timed out, finishing early");
                    break;
                }
            };

            let outcome = state.ingest(&page, cutoff, limit);
            state.page_index += 1;

            if let PageOutcome::Stop(reason) = outcome {
                tracing::debug!(?reason, commits = state.num_commits, "run complete");
                break;
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }
        Ok(state.finish())
    }
}
