use predicates::prelude::*;
use test_support::{cmd_bin, pull_json, tempdir, BIN, PULLS_ENV, TOKEN_ENV};

#[test]
fn errors_without_a_window() {
  let mut cmd = cmd_bin(BIN);
  cmd.env(TOKEN_ENV, "t")
    .assert()
    .failure()
    .stderr(predicate::str::contains("--start-date").and(predicate::str::contains("--end-date")));
}

#[test]
fn last_month_conflicts_with_explicit_dates() {
  let mut cmd = cmd_bin(BIN);
  cmd.env(TOKEN_ENV, "t")
    .args(["--last-month", "--start-date", "2025-06-01", "--end-date", "2025-06-30"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_token_aborts_before_any_work() {
  let td = tempdir();
  let pulls = serde_json::json!([pull_json(1, "alice", "2025-06-02T00:00:00Z", None)]).to_string();

  let mut cmd = cmd_bin(BIN);
  cmd.current_dir(td.path())
    .env_remove(TOKEN_ENV)
    .env(PULLS_ENV, pulls)
    .args(["--start-date", "2025-06-01", "--end-date", "2025-06-30"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("Generating report").not())
    .stderr(predicate::str::contains("API_METRICS_KEY not set"));

  assert!(!td.path().join("output").exists());
}

#[test]
fn blank_token_is_treated_as_missing() {
  let mut cmd = cmd_bin(BIN);
  cmd.env(TOKEN_ENV, "  ")
    .args(["--start-date", "2025-06-01", "--end-date", "2025-06-30"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("API_METRICS_KEY"));
}

#[test]
fn invalid_date_is_reported() {
  let (_td, mut cmd) = test_support::cmd_metrics(&[]);
  cmd.args(["--start-date", "2025-06-01", "--end-date", "June 30th"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("parsing --end-date"));
}

#[test]
fn token_is_read_from_dotenv_in_working_directory() {
  let (td, mut cmd) = test_support::cmd_metrics(&[pull_json(1, "alice", "2025-06-02T00:00:00Z", None)]);
  std::fs::write(td.path().join(".env"), format!("{}=ghp_dotenv\n", TOKEN_ENV)).unwrap();

  cmd.env_remove(TOKEN_ENV)
    .args(["--start-date", "2025-06-01", "--end-date", "2025-06-30", "--teams", "teams.json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Fetched 1 Pull Requests in the period."));

  assert!(td.path().join("output/monthly_team_metrics_2025-06-01_to_2025-06-30.csv").exists());
}
