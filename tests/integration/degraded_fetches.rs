use predicates::prelude::*;
use test_support::{cmd_metrics, pull_json, write_teams, FAIL_PAGE_ENV};

const WINDOW: [&str; 4] = ["--start-date", "2025-06-01", "--end-date", "2025-06-30"];
const REPORT: &str = "output/monthly_team_metrics_2025-06-01_to_2025-06-30.csv";

fn many_pulls(n: u64) -> Vec<serde_json::Value> {
  (1..=n)
    .map(|i| pull_json(i, "alice", "2025-06-15T00:00:00Z", None))
    .collect()
}

#[test]
fn failed_page_keeps_what_was_fetched() {
  let (td, mut cmd) = cmd_metrics(&many_pulls(150));
  let teams = write_teams(td.path(), &[("alice", "core")]);

  cmd.env(FAIL_PAGE_ENV, "2")
    .args(WINDOW)
    .arg("--teams")
    .arg(&teams)
    .assert()
    .success()
    .stderr(predicate::str::contains("API request error on page 2"))
    .stdout(predicate::str::contains("Fetched 100 Pull Requests in the period."));

  let csv = std::fs::read_to_string(td.path().join(REPORT)).unwrap();
  assert!(csv.contains("\ncore,100,0,0,0,0.0,0.0\n"));
}

#[test]
fn failed_first_page_means_no_report() {
  let (td, mut cmd) = cmd_metrics(&many_pulls(3));

  cmd.env(FAIL_PAGE_ENV, "1")
    .args(WINDOW)
    .args(["--teams", "teams.json"])
    .assert()
    .success()
    .stderr(
      predicate::str::contains("API request error on page 1")
        .and(predicate::str::contains("No report written; the pull request listing failed (1 page error(s))")),
    )
    .stdout(predicate::str::contains("Fetched 0 Pull Requests in the period."));

  assert!(!td.path().join("output").exists());
}

#[test]
fn failed_details_zero_line_counts() {
  let (td, mut cmd) = cmd_metrics(&[pull_json(9, "alice", "2025-06-02T00:00:00Z", Some("2025-06-02T12:00:00Z"))]);
  let teams = write_teams(td.path(), &[("alice", "core")]);

  cmd.args(WINDOW)
    .arg("--teams")
    .arg(&teams)
    .assert()
    .success()
    .stderr(predicate::str::contains("pull request #9").and(predicate::str::contains("could not be fetched")));

  let csv = std::fs::read_to_string(td.path().join(REPORT)).unwrap();
  assert!(csv.contains("\ncore,1,1,0,0,100.0,0.5\n"));
}
