// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed records flowing through the metrics pipeline (API summaries, details, per-PR records, team rows)
// role: data/model
// outputs: PullRequestSummary, PullRequestDetail, PullRequestMetricRecord, TeamAggregate, Fetched/Completeness
// invariants:
// - PullRequestDetail::default() is the "empty detail" (all counts zero)
// - time_to_merge_hours is 0.0 whenever merged is false
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel team for contributors missing from the team directory.
pub const UNASSIGNED_TEAM: &str = "Unassigned";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
  Open,
  Closed,
}

/// One entry of the `state=all` pull request listing.
#[derive(Clone, Debug, PartialEq)]
pub struct PullRequestSummary {
  pub number: u64,
  pub author: String,
  pub state: PrState,
  pub created_at: Option<DateTime<Utc>>,
  pub merged_at: Option<DateTime<Utc>>,
}

/// Per-PR detail; only the line counts are consumed downstream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PullRequestDetail {
  pub number: Option<u64>,
  pub additions: u64,
  pub deletions: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PullRequestMetricRecord {
  pub team: String,
  pub pr_id: u64,
  pub author: String,
  pub state: PrState,
  pub merged: bool,
  pub time_to_merge_hours: f64,
  pub lines_added: u64,
  pub lines_deleted: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamAggregate {
  pub team: String,
  pub total_prs: u64,
  pub merged_prs: u64,
  pub total_additions: u64,
  pub total_deletions: u64,
  pub merge_rate_percent: f64,
  pub avg_cycle_time_days: f64,
}

/// Whether a best-effort fetch saw every item or gave up part way.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Completeness {
  Complete,
  Truncated { errors: usize },
}

impl Completeness {
  pub fn from_errors(errors: usize) -> Self {
    if errors == 0 {
      Completeness::Complete
    } else {
      Completeness::Truncated { errors }
    }
  }

  pub fn is_complete(&self) -> bool {
    matches!(self, Completeness::Complete)
  }
}

/// Items plus how they were obtained. Degraded results are data, not log text.
#[derive(Clone, Debug, PartialEq)]
pub struct Fetched<T> {
  pub items: T,
  pub completeness: Completeness,
}
