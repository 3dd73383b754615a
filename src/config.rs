// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run configuration built once at start-up and handed to the fetcher and report writer
// role: config/runtime
// inputs: API_METRICS_KEY (process environment or a .env file); normalized CLI values
// outputs: Config (token, repository coordinates, file locations, window strings)
// invariants:
// - A Config always carries a non-blank token
// - Debug output never includes the token
// errors: Missing/blank token is fatal before any network or file activity
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::path::PathBuf;

use anyhow::{Result, bail};

pub const TOKEN_ENV: &str = "API_METRICS_KEY";
pub const DEFAULT_OWNER: &str = "digitaltitransversal";
pub const DEFAULT_REPO: &str = "spin-spec-apis";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_OUT_DIR: &str = "output";
pub const TEAMS_FILE: &str = "teams.json";
pub const PER_PAGE: u32 = 100;

#[derive(Clone)]
pub struct Config {
  pub token: String,
  pub owner: String,
  pub repo: String,
  pub api_base: String,
  pub teams_path: PathBuf,
  pub out_dir: PathBuf,
  pub per_page: u32,
  /// Raw window strings; reused verbatim in the report file name.
  pub start_date: String,
  pub end_date: String,
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("token", &"<redacted>")
      .field("owner", &self.owner)
      .field("repo", &self.repo)
      .field("api_base", &self.api_base)
      .field("teams_path", &self.teams_path)
      .field("out_dir", &self.out_dir)
      .field("per_page", &self.per_page)
      .field("start_date", &self.start_date)
      .field("end_date", &self.end_date)
      .finish()
  }
}

/// Load `.env` from the working directory (or a parent) into the process environment.
/// Variables already set win. Returns the file used, if any.
pub fn load_dotenv() -> Option<PathBuf> {
  dotenvy::dotenv().ok()
}

/// Read the access token from the environment.
pub fn read_token() -> Result<String> {
  match std::env::var(TOKEN_ENV) {
    Ok(t) if !t.trim().is_empty() => Ok(t.trim().to_string()),
    _ => bail!("{} not set; export a GitHub access token or add it to a .env file", TOKEN_ENV),
  }
}

/// `teams.json` next to the running executable, or in the working directory as a fallback.
pub fn default_teams_path() -> PathBuf {
  std::env::current_exe()
    .ok()
    .and_then(|exe| exe.parent().map(|dir| dir.join(TEAMS_FILE)))
    .unwrap_or_else(|| PathBuf::from(TEAMS_FILE))
}
