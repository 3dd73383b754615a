// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Extension traits over third-party crates used at the API parsing boundary
// role: module/aggregation
// outputs: JsonFetch for typed, defaulting reads of GitHub JSON
// invariants: No side effects; pure extensions only
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod serde_json;
