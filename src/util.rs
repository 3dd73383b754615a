// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Process-level helpers: diagnostics subscriber setup and man page rendering
// role: utilities/helpers
// inputs: RUST_LOG; clap CommandFactory
// outputs: Global tracing subscriber on stderr; man page text
// side_effects: init_logging installs the global subscriber (first call wins)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::IsTerminal;

use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

/// Install the stderr diagnostics subscriber. Honors `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .without_time()
    .try_init();
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
