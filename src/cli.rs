use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::window;

#[derive(Parser, Debug)]
#[command(
    name = "team-pr-metrics",
    version,
    about = "Monthly per-team pull request metrics for a GitHub repository (CSV + console)",
    long_about = None
)]
pub struct Cli {
  /// Window start, e.g. 2025-06-01 (inclusive, UTC; reused verbatim in the report file name)
  #[arg(long, required_unless_present_any = ["last_month", "gen_man"], conflicts_with = "last_month")]
  pub start_date: Option<String>,

  /// Window end, e.g. 2025-06-30 (inclusive; a bare date means midnight UTC)
  #[arg(long, required_unless_present_any = ["last_month", "gen_man"], conflicts_with = "last_month")]
  pub end_date: Option<String>,

  /// Use the previous calendar month instead of --start-date/--end-date
  #[arg(long)]
  pub last_month: bool,

  /// Team mapping file: JSON array of {"github_user", "team"} (default: teams.json next to the binary)
  #[arg(long)]
  pub teams: Option<PathBuf>,

  /// Directory for the CSV report (created when missing)
  #[arg(long, default_value = config::DEFAULT_OUT_DIR)]
  pub out_dir: PathBuf,

  /// Repository owner
  #[arg(long, default_value = config::DEFAULT_OWNER)]
  pub owner: String,

  /// Repository name
  #[arg(long, default_value = config::DEFAULT_REPO)]
  pub repo: String,

  /// REST API base URL (hidden; tests and GitHub Enterprise)
  #[arg(long, default_value = config::DEFAULT_API_BASE, hide = true)]
  pub api_base: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

/// Resolve CLI flags into the run configuration. `now` anchors `--last-month`.
pub fn normalize(cli: Cli, token: String, now: DateTime<Utc>) -> Result<Config> {
  let (start_date, end_date) = match (cli.last_month, cli.start_date, cli.end_date) {
    (true, None, None) => window::last_month_window(now)?,
    (false, Some(s), Some(e)) => (s, e),
    (true, _, _) => bail!("--last-month cannot be combined with --start-date/--end-date"),
    _ => bail!("Provide both --start-date and --end-date, or --last-month"),
  };

  Ok(Config {
    token,
    owner: cli.owner,
    repo: cli.repo,
    api_base: cli.api_base,
    teams_path: cli.teams.unwrap_or_else(config::default_teams_path),
    out_dir: cli.out_dir,
    per_page: config::PER_PAGE,
    start_date,
    end_date,
  })
}
