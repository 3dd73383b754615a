//! test-support: helpers for the team-pr-metrics CLI tests.
//!
//! ```rust
//! use test_support::{cmd_metrics, pull_json};
//!
//! #[test]
//! fn example() {
//!     let (td, mut cmd) = cmd_metrics(&[pull_json(1, "alice", "2025-06-01T00:00:00Z", None)]);
//!     cmd.args(["--start-date", "2025-06-01", "--end-date", "2025-06-30"]);
//!     let _ = td;
//! }
//! ```

use once_cell::sync::Lazy;
use serde_json::{Value, json};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

pub const BIN: &str = "team-pr-metrics";
pub const TOKEN_ENV: &str = "API_METRICS_KEY";
pub const PULLS_ENV: &str = "TPM_TEST_PULLS_JSON";
pub const DETAILS_ENV: &str = "TPM_TEST_PULL_DETAILS_JSON";
pub const FAIL_PAGE_ENV: &str = "TPM_TEST_FAIL_PAGE";

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// A listing entry shaped like GitHub's `GET /repos/{o}/{r}/pulls` items.
pub fn pull_json(number: u64, login: &str, created_at: &str, merged_at: Option<&str>) -> Value {
    json!({
        "number": number,
        "user": { "login": login },
        "state": if merged_at.is_some() { "closed" } else { "open" },
        "created_at": created_at,
        "merged_at": merged_at,
    })
}

/// Write a team mapping file (`[{github_user, team}]`) and return its path.
pub fn write_teams(dir: &Path, pairs: &[(&str, &str)]) -> PathBuf {
    let entries: Vec<Value> = pairs
        .iter()
        .map(|(user, team)| json!({ "github_user": user, "team": team }))
        .collect();
    let path = dir.join("teams.json");
    std::fs::write(&path, Value::Array(entries).to_string()).expect("write teams.json");
    path
}

/// The binary, run inside a fresh temp dir with a token and fixture-backed GitHub API.
///
/// Returns the temp dir too; keep it alive for as long as the command's files are needed.
pub fn cmd_metrics(pulls: &[Value]) -> (tempfile::TempDir, assert_cmd::Command) {
    let td = tempdir();
    let mut cmd = cmd_bin(BIN);
    cmd.current_dir(td.path())
        .env(TOKEN_ENV, "test-token")
        .env(PULLS_ENV, Value::Array(pulls.to_vec()).to_string())
        .env(DETAILS_ENV, "{}")
        .env_remove(FAIL_PAGE_ENV)
        .env("RUST_LOG", "info");
    (td, cmd)
}
