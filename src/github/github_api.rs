// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub REST transport behind a trait seam (HTTP via ureq, env-backed fixtures for tests)
// role: github/api
// inputs: Config (token, owner/repo, API base); env TPM_TEST_* fixtures when present
// outputs: Raw JSON pages with a next-page flag; raw JSON pull details
// side_effects: Blocking HTTPS GETs against the configured API base
// invariants:
// - Every request carries Authorization, Accept and User-Agent headers
// - has_next is true only when the Link header declares rel="next"
// errors: Transport, HTTP status and decode failures are returned, never swallowed here
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("team-pr-metrics/", env!("CARGO_PKG_VERSION"));

pub const FIXTURE_PULLS_ENV: &str = "TPM_TEST_PULLS_JSON";
pub const FIXTURE_DETAILS_ENV: &str = "TPM_TEST_PULL_DETAILS_JSON";
pub const FIXTURE_FAIL_PAGE_ENV: &str = "TPM_TEST_FAIL_PAGE";

/// One page of the pull request listing.
#[derive(Debug, Clone)]
pub struct PageResponse {
  pub items: serde_json::Value,
  pub has_next: bool,
}

// --- Trait seam for GitHub API ---
pub trait GithubApi {
  fn list_pulls_page(&self, page: u32, per_page: u32) -> Result<PageResponse>;
  fn get_pull_json(&self, number: u64) -> Result<serde_json::Value>;
}

/// True when a `Link` header advertises a `rel="next"` target.
pub fn has_next_link(link: &str) -> bool {
  static RE_REL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<[^>]*>\s*;\s*rel="([^"]*)""#).unwrap());

  RE_REL
    .captures_iter(link)
    .any(|c| c[1].split_whitespace().any(|rel| rel == "next"))
}

pub struct GithubHttpApi {
  agent: ureq::Agent,
  token: String,
  repo_url: String,
}

impl GithubHttpApi {
  pub fn new(cfg: &Config) -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder().build().into();
    let repo_url = format!("{}/repos/{}/{}", cfg.api_base.trim_end_matches('/'), cfg.owner, cfg.repo);

    Self {
      agent,
      token: cfg.token.clone(),
      repo_url,
    }
  }

  fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<(serde_json::Value, Option<String>)> {
    let mut req = self
      .agent
      .get(url)
      .header("Accept", ACCEPT)
      .header("User-Agent", USER_AGENT)
      .header("Authorization", &format!("Bearer {}", self.token));

    for (k, v) in query {
      req = req.query(*k, v);
    }

    let mut resp = req.call().with_context(|| format!("GET {}", url))?;

    let link = resp
      .headers()
      .get("link")
      .and_then(|v| v.to_str().ok())
      .map(str::to_string);
    let body = resp
      .body_mut()
      .read_json::<serde_json::Value>()
      .with_context(|| format!("decoding JSON from {}", url))?;

    Ok((body, link))
  }
}

impl GithubApi for GithubHttpApi {
  fn list_pulls_page(&self, page: u32, per_page: u32) -> Result<PageResponse> {
    let url = format!("{}/pulls", self.repo_url);
    let query = [
      ("state", "all".to_string()),
      ("page", page.to_string()),
      ("per_page", per_page.to_string()),
    ];
    let (items, link) = self.get_json(&url, &query)?;

    Ok(PageResponse {
      items,
      has_next: link.as_deref().is_some_and(has_next_link),
    })
  }

  fn get_pull_json(&self, number: u64) -> Result<serde_json::Value> {
    let url = format!("{}/pulls/{}", self.repo_url, number);
    self.get_json(&url, &[]).map(|(body, _)| body)
  }
}

/// Fixture backend: serves the listing from env JSON, paged like the real API.
pub struct GithubEnvApi;

impl GithubApi for GithubEnvApi {
  fn list_pulls_page(&self, page: u32, per_page: u32) -> Result<PageResponse> {
    if let Ok(fail) = std::env::var(FIXTURE_FAIL_PAGE_ENV) {
      if fail.trim().parse::<u32>().ok() == Some(page) {
        bail!("fixture failure for page {}", page);
      }
    }

    let raw = std::env::var(FIXTURE_PULLS_ENV).with_context(|| format!("{} not set", FIXTURE_PULLS_ENV))?;
    let all: Vec<serde_json::Value> = serde_json::from_str(&raw).with_context(|| format!("parsing {}", FIXTURE_PULLS_ENV))?;

    let per_page = per_page.max(1) as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(per_page).min(all.len());
    let end = start.saturating_add(per_page).min(all.len());

    Ok(PageResponse {
      items: serde_json::Value::Array(all[start..end].to_vec()),
      has_next: end < all.len(),
    })
  }

  fn get_pull_json(&self, number: u64) -> Result<serde_json::Value> {
    let raw = std::env::var(FIXTURE_DETAILS_ENV).unwrap_or_else(|_| "{}".to_string());
    let details: serde_json::Value =
      serde_json::from_str(&raw).with_context(|| format!("parsing {}", FIXTURE_DETAILS_ENV))?;

    match details.get(number.to_string()) {
      Some(d) => Ok(d.clone()),
      None => bail!("no fixture detail for pull request #{}", number),
    }
  }
}

fn env_wants_mock() -> bool {
  std::env::var(FIXTURE_PULLS_ENV).is_ok()
}

/// Pick the backend for this run: env fixtures when present, otherwise HTTP.
pub fn build_api(cfg: &Config) -> Box<dyn GithubApi> {
  if env_wants_mock() {
    Box::new(GithubEnvApi)
  } else {
    Box::new(GithubHttpApi::new(cfg))
  }
}
