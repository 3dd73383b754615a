// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn windowed PR summaries into per-PR metric records (team, merge flag, cycle time, line counts)
// role: metrics/extractor
// inputs: Filtered PullRequestSummary list, TeamDirectory, &dyn GithubApi for details
// outputs: Extraction { records, unassigned authors, detail completeness }
// side_effects: One serial detail request per pull request
// invariants:
// - merged == merged_at.is_some(); time_to_merge_hours is 0.0 unless merged
// - Each unassigned author is reported once regardless of PR count
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::github::github_api::GithubApi;
use crate::github::pull_requests::get_pull_request_detail;
use crate::model::{Completeness, PullRequestDetail, PullRequestMetricRecord, PullRequestSummary};
use crate::teams::TeamDirectory;

#[derive(Debug)]
pub struct Extraction {
  pub records: Vec<PullRequestMetricRecord>,
  /// Authors with no team mapping, sorted by login.
  pub unassigned: BTreeSet<String>,
  pub details: Completeness,
}

/// Elapsed hours between two instants (fractional). Zero when either end is missing.
pub fn hours_between(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> f64 {
  match (start, end) {
    (Some(s), Some(e)) => ((e - s).num_milliseconds() as f64 / 1000.0 / 3600.0).max(0.0),
    _ => 0.0,
  }
}

pub fn build_record(pr: &PullRequestSummary, team: &str, detail: &PullRequestDetail) -> PullRequestMetricRecord {
  let merged = pr.merged_at.is_some();
  let time_to_merge_hours = if merged { hours_between(pr.created_at, pr.merged_at) } else { 0.0 };

  PullRequestMetricRecord {
    team: team.to_string(),
    pr_id: pr.number,
    author: pr.author.clone(),
    state: pr.state,
    merged,
    time_to_merge_hours,
    lines_added: detail.additions,
    lines_deleted: detail.deletions,
  }
}

pub fn extract_metrics(prs: &[PullRequestSummary], teams: &TeamDirectory, api: &dyn GithubApi) -> Extraction {
  let mut records = Vec::with_capacity(prs.len());
  let mut unassigned = BTreeSet::new();
  let mut detail_errors = 0usize;

  for pr in prs {
    let team = match teams.team_of(&pr.author) {
      Some(t) => t,
      None => {
        unassigned.insert(pr.author.clone());
        teams.resolve(&pr.author)
      }
    };

    let detail = get_pull_request_detail(api, pr.number);
    if let Completeness::Truncated { errors } = detail.completeness {
      detail_errors += errors;
    }

    records.push(build_record(pr, team, &detail.items));
  }

  Extraction {
    records,
    unassigned,
    details: Completeness::from_errors(detail_errors),
  }
}
