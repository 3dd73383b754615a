// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Best-effort retrieval of typed pull request summaries (paginated) and per-PR details
// role: github/pull-requests
// inputs: &dyn GithubApi, page size, PR numbers
// outputs: Fetched<Vec<PullRequestSummary>>, Fetched<PullRequestDetail>
// side_effects: One request per page; one request per detail
// invariants:
// - Items keep API order; a PR number appearing twice keeps its first occurrence
// - A failed page ends pagination and marks the result Truncated; accumulated items are kept
// - A failed detail yields PullRequestDetail::default()
// errors: None propagated; failures are logged and reflected in Completeness
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use anyhow::{Result, bail};
use tracing::{debug, error, warn};

use crate::ext::serde_json::JsonFetch;
use crate::github::github_api::GithubApi;
use crate::model::{Completeness, Fetched, PrState, PullRequestDetail, PullRequestSummary};

/// Walk the `state=all` listing until an empty page or a page without a next link.
pub fn list_pull_requests(api: &dyn GithubApi, per_page: u32) -> Fetched<Vec<PullRequestSummary>> {
  let mut out: Vec<PullRequestSummary> = Vec::new();
  let mut seen: HashSet<u64> = HashSet::new();
  let mut errors = 0usize;
  let mut page = 1u32;

  loop {
    let (items, has_next) = match fetch_page(api, page, per_page) {
      Ok(p) => p,
      Err(e) => {
        error!("[github] API request error on page {}: {:#}", page, e);
        errors += 1;
        break;
      }
    };

    if items.is_empty() {
      break;
    }

    for item in &items {
      let Some(summary) = summary_from_json(item) else {
        warn!("[github] Skipping pull request entry without a number on page {}", page);
        continue;
      };

      if seen.insert(summary.number) {
        out.push(summary);
      } else {
        debug!("[github] Pull request #{} listed twice; keeping the first", summary.number);
      }
    }

    if !has_next {
      break;
    }
    page += 1;
  }

  Fetched {
    items: out,
    completeness: Completeness::from_errors(errors),
  }
}

fn fetch_page(api: &dyn GithubApi, page: u32, per_page: u32) -> Result<(Vec<serde_json::Value>, bool)> {
  let resp = api.list_pulls_page(page, per_page)?;

  match resp.items {
    serde_json::Value::Array(items) => Ok((items, resp.has_next)),
    other => bail!("expected a JSON array of pull requests, got {}", json_kind(&other)),
  }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
  match v {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "a boolean",
    serde_json::Value::Number(_) => "a number",
    serde_json::Value::String(_) => "a string",
    serde_json::Value::Array(_) => "an array",
    serde_json::Value::Object(_) => "an object",
  }
}

/// Fetch one PR's detail; on failure log and substitute an empty detail.
pub fn get_pull_request_detail(api: &dyn GithubApi, number: u64) -> Fetched<PullRequestDetail> {
  match api.get_pull_json(number) {
    Ok(v) => {
      let detail = detail_from_json(&v);
      if detail.number.is_some_and(|n| n != number) {
        warn!("[github] Detail for pull request #{} reports number {:?}", number, detail.number);
      }
      Fetched {
        items: detail,
        completeness: Completeness::Complete,
      }
    }
    Err(e) => {
      warn!("[github] API request error for pull request #{}: {:#}", number, e);
      Fetched {
        items: PullRequestDetail::default(),
        completeness: Completeness::Truncated { errors: 1 },
      }
    }
  }
}

/// Build a typed summary; `None` when the entry has no PR number.
pub fn summary_from_json(pr_json: &serde_json::Value) -> Option<PullRequestSummary> {
  let number = pr_json.fetch("number").to::<u64>()?;
  // Deleted accounts come back as a null user; GitHub renders them as "ghost".
  let author = pr_json.fetch("user.login").to::<String>().unwrap_or_else(|| "ghost".to_string());
  let state = pr_json.fetch("state").to::<PrState>().unwrap_or(PrState::Open);

  Some(PullRequestSummary {
    number,
    author,
    state,
    created_at: pr_json.fetch("created_at").to_utc(),
    merged_at: pr_json.fetch("merged_at").to_utc(),
  })
}

pub fn detail_from_json(pr_json: &serde_json::Value) -> PullRequestDetail {
  PullRequestDetail {
    number: pr_json.fetch("number").to::<u64>(),
    additions: pr_json.fetch("additions").to_or_default::<u64>(),
    deletions: pr_json.fetch("deletions").to_or_default::<u64>(),
  }
}
