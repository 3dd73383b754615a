use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{debug, warn};

mod aggregate;
mod cli;
mod config;
mod ext;
mod github;
mod metrics;
mod model;
mod pipeline;
mod report;
mod teams;
mod util;
mod window;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_logging();

  // Phase 1: token first (.env, then the environment); nothing else runs without it
  if let Some(path) = config::load_dotenv() {
    debug!("Loaded environment from {}", path.display());
  }
  let token = config::read_token()?;

  // Phase 2: resolve the run configuration and transport
  let cfg = normalize(cli, token, Utc::now())?;
  let api = github::github_api::build_api(&cfg);

  // Phase 3: run the pipeline
  match pipeline::run(&cfg, api.as_ref())? {
    pipeline::RunOutcome::Written(summary) => {
      if !(summary.listing.is_complete() && summary.details.is_complete()) {
        warn!(
          "[report] {} ({} team row(s)) was built from incomplete data: listing {:?}, details {:?}",
          summary.path.display(),
          summary.rows.len(),
          summary.listing,
          summary.details
        );
      }
    }
    pipeline::RunOutcome::NoPullRequests { listing } => {
      if let model::Completeness::Truncated { errors } = listing {
        warn!(
          "[report] No report written; the pull request listing failed ({} page error(s)), so the period may not be empty",
          errors
        );
      }
    }
  }

  Ok(())
}
