// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Group per-PR records by team and compute the report's summary statistics
// role: metrics/aggregator
// inputs: &[PullRequestMetricRecord]
// outputs: Vec<TeamAggregate> sorted by merge rate (desc)
// invariants:
// - merge_rate_percent == merged_prs / total_prs * 100, always within [0, 100]
// - avg_cycle_time_days == round(mean(time_to_merge_hours) / 24, 2); unmerged records count as 0
// - Groups are formed in team-name order; the merge-rate sort is stable, so ties stay alphabetical
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use crate::model::{PullRequestMetricRecord, TeamAggregate};

#[derive(Default)]
struct TeamTotals {
  total_prs: u64,
  merged_prs: u64,
  total_additions: u64,
  total_deletions: u64,
  sum_hours: f64,
}

/// Round to `places` decimals, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
  let scale = 10f64.powi(places);
  (value * scale).round_ties_even() / scale
}

pub fn aggregate_by_team(records: &[PullRequestMetricRecord]) -> Vec<TeamAggregate> {
  let mut groups: BTreeMap<&str, TeamTotals> = BTreeMap::new();

  for r in records {
    let t = groups.entry(r.team.as_str()).or_default();
    t.total_prs += 1;
    t.merged_prs += u64::from(r.merged);
    t.total_additions += r.lines_added;
    t.total_deletions += r.lines_deleted;
    t.sum_hours += r.time_to_merge_hours;
  }

  let mut rows: Vec<TeamAggregate> = groups
    .into_iter()
    .map(|(team, t)| {
      // BTreeMap entries only exist for teams with at least one record
      let total = t.total_prs as f64;
      let mean_hours = t.sum_hours / total;

      TeamAggregate {
        team: team.to_string(),
        total_prs: t.total_prs,
        merged_prs: t.merged_prs,
        total_additions: t.total_additions,
        total_deletions: t.total_deletions,
        merge_rate_percent: t.merged_prs as f64 / total * 100.0,
        avg_cycle_time_days: round_to(mean_hours / 24.0, 2),
      }
    })
    .collect();

  rows.sort_by(|a, b| b.merge_rate_percent.total_cmp(&a.merge_rate_percent));

  rows
}
