use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::aggregate::{Aggregator, AggregatorConfig};
use crate::remote::{RemoteClient, DEFAULT_HOST};
use crate::score::HealthPolicy;

#[derive(Parser)]
#[command(name = "repopulse")]
#[command(about = "Project health meter for remote git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Base URL of the commit-list API", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(
        long,
        help = "Pause between page requests",
        value_parser = humantime::parse_duration,
        default_value = "500ms"
    )]
    pub page_delay: Duration,

    #[arg(
        long,
        help = "Give up on a page response after this long",
        value_parser = humantime::parse_duration,
        default_value = "5s"
    )]
    pub page_timeout: Duration,

    #[arg(long, help = "Recency window in days", default_value_t = 30)]
    pub window_days: i64,

    #[arg(
        long,
        help = "Commits within the window for full health",
        default_value_t = 15
    )]
    pub healthy: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Soft cap on commits counted")]
        limit: Option<u64>,

        #[arg(help = "user/project/branch reference on the remote host")]
        repo_ref: String,
    },
    Health {
        #[arg(long, help = "Commit count to score directly, skipping the fetch")]
        commits: Option<u64>,

        #[arg(
            help = "user/project/branch reference on the remote host",
            required_unless_present = "commits",
            conflicts_with = "commits"
        )]
        repo_ref: Option<String>,
    },
    Render {
        #[arg(long, help = "Health value in [0, 1]")]
        health: f64,

        #[arg(long, help = "Meter width in pixels", default_value_t = 200)]
        width: u32,

        #[arg(long, help = "Meter height in pixels", default_value_t = 10)]
        height: u32,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    Status {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(help = "user/project/branch reference on the remote host")]
        repo_ref: String,
    },
}

impl CommonArgs {
    pub fn aggregator(&self) -> Aggregator {
        let config = AggregatorConfig {
            window_days: self.window_days,
            page_delay: self.page_delay,
            page_timeout: self.page_timeout,
        };
        Aggregator::new(RemoteClient::new(self.host.clone()), config)
    }

    pub fn policy(&self) -> HealthPolicy {
        HealthPolicy {
            healthy_commits: self.healthy,
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats {
                json,
                ndjson,
                limit,
                repo_ref,
            } => crate::stats::exec(self.common, repo_ref, limit, json, ndjson).await,
            Commands::Health { commits, repo_ref } => {
                crate::score::exec(self.common, repo_ref, commits).await
            }
            Commands::Render {
                health,
                width,
                height,
                json,
                ndjson,
            } => crate::meter::exec(health, width, height, json, ndjson),
            Commands::Status {
                json,
                ndjson,
                repo_ref,
            } => crate::status::exec(self.common, repo_ref, json, ndjson).await,
        }
    }
}
