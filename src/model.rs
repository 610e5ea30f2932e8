use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as returned by the commit-list API. Consumed transiently
/// per page, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRecord {
    pub author: String,
    pub authored_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitPage {
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub num_commits: u64,
    pub num_committers: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One paint instruction of the meter: a block of `width` x `height`
/// pixels at horizontal offset `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub x: u32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy)]
pub struct GradientSpec {
    pub width: u32,
    pub height: u32,
    pub interval: u32,
}

impl GradientSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Self::default() }
    }
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self { width: 200, height: 10, interval: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub host: String,
    pub repo_ref: String,
    pub stats: RepoStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub health: f64,
    pub width: u32,
    pub height: u32,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub host: String,
    pub repo_ref: String,
    pub health: f64,
    pub stats: RepoStats,
    pub segments: Vec<Segment>,
}
