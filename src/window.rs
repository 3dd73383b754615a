// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse report window bounds as UTC instants and filter pull requests by creation time
// role: windowing/filter
// inputs: ISO-8601 strings (offset-aware, naive, or bare dates); PullRequestSummary lists
// outputs: TimeWindow; filtered summaries in original order; previous-month window strings
// invariants:
// - Naive timestamps and bare dates are UTC (bare date = midnight)
// - Both bounds are inclusive; summaries without created_at are dropped
// errors: Unparseable bounds surface as anyhow errors naming the input
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::model::PullRequestSummary;

const OFFSET_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f%:z",
  "%Y-%m-%dT%H:%M:%S%.f%z",
  "%Y-%m-%dT%H:%M%:z",
  "%Y-%m-%dT%H:%M%z",
  "%Y-%m-%d %H:%M:%S%.f%:z",
  "%Y-%m-%d %H:%M:%S%.f%z",
  "%Y-%m-%d %H:%M%:z",
  "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp into UTC. Values without an offset are taken as UTC.
pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>> {
  let s = raw.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }

  // trailing Z is +00:00
  let zoned = match s.strip_suffix(['Z', 'z']) {
    Some(rest) => format!("{}+00:00", rest),
    None => s.to_string(),
  };
  for fmt in OFFSET_FORMATS {
    if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
      return Ok(dt.with_timezone(&Utc));
    }
  }

  for fmt in NAIVE_FORMATS {
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Ok(Utc.from_utc_datetime(&ndt));
    }
  }

  if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)));
  }

  bail!("invalid timestamp '{}', expected YYYY-MM-DD or an ISO-8601 date-time", raw)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimeWindow {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

impl TimeWindow {
  pub fn parse(start: &str, end: &str) -> Result<Self> {
    let start = parse_utc(start).context("parsing --start-date")?;
    let end = parse_utc(end).context("parsing --end-date")?;

    Ok(Self { start, end })
  }

  pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
    self.start <= *instant && *instant <= self.end
  }
}

/// Keep the summaries created inside `window`, preserving their order.
pub fn filter_by_created(prs: Vec<PullRequestSummary>, window: &TimeWindow) -> Vec<PullRequestSummary> {
  prs
    .into_iter()
    .filter(|pr| pr.created_at.as_ref().is_some_and(|c| window.contains(c)))
    .collect()
}

/// Bounds of the calendar month before `now`: first day 00:00:00 through the month's last second.
pub fn last_month_window(now: DateTime<Utc>) -> Result<(String, String)> {
  let first_of_current = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
    .context("computing first day of the current month")?
    .and_time(NaiveTime::MIN);
  let end = Utc.from_utc_datetime(&first_of_current) - Duration::seconds(1);

  let first_of_last = NaiveDate::from_ymd_opt(end.year(), end.month(), 1)
    .context("computing first day of the previous month")?
    .and_time(NaiveTime::MIN);
  let start = Utc.from_utc_datetime(&first_of_last);

  Ok((
    start.to_rfc3339_opts(SecondsFormat::Secs, false),
    end.to_rfc3339_opts(SecondsFormat::Secs, false),
  ))
}
