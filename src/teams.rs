// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load the contributor -> team side file and resolve logins to teams
// role: input/team-directory
// inputs: Path to a JSON array of { github_user, team }
// outputs: TeamDirectory (immutable after load)
// side_effects: Reads one file
// invariants:
// - Missing file is not fatal: warn and return an empty directory
// - Unknown logins resolve to UNASSIGNED_TEAM
// errors: Unreadable or malformed file propagates with the path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::model::UNASSIGNED_TEAM;

#[derive(Debug, Deserialize)]
struct TeamEntry {
  github_user: String,
  team: String,
}

#[derive(Clone, Debug, Default)]
pub struct TeamDirectory {
  members: HashMap<String, String>,
}

impl TeamDirectory {
  pub fn from_pairs<I, U, T>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (U, T)>,
    U: Into<String>,
    T: Into<String>,
  {
    let members = pairs.into_iter().map(|(u, t)| (u.into(), t.into())).collect();
    Self { members }
  }

  /// Team for `login`, or `None` when the login is not mapped.
  pub fn team_of(&self, login: &str) -> Option<&str> {
    self.members.get(login).map(String::as_str)
  }

  pub fn resolve(&self, login: &str) -> &str {
    self.team_of(login).unwrap_or(UNASSIGNED_TEAM)
  }

  pub fn len(&self) -> usize {
    self.members.len()
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}

pub fn load_team_directory(path: &Path) -> Result<TeamDirectory> {
  let raw = match std::fs::read_to_string(path) {
    Ok(s) => s,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      warn!("[teams] Team mapping file '{}' not found; every author maps to {}", path.display(), UNASSIGNED_TEAM);
      return Ok(TeamDirectory::default());
    }
    Err(e) => return Err(e).with_context(|| format!("reading team mapping {}", path.display())),
  };

  let entries: Vec<TeamEntry> =
    serde_json::from_str(&raw).with_context(|| format!("parsing team mapping {}", path.display()))?;

  Ok(TeamDirectory::from_pairs(entries.into_iter().map(|e| (e.github_user, e.team))))
}
