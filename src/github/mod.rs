// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the GitHub remote data fetcher (transport seam + typed PR retrieval)
// role: github/namespace
// outputs: github_api (trait + backends) and pull_requests (best-effort typed fetches)
// invariants: Network failures never abort a run; they degrade results and are reported via Completeness
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod github_api;
pub mod pull_requests;
