// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Serialize team aggregates to the monthly CSV file and echo them as a console table
// role: output/report-writer
// inputs: Config (out_dir, raw window strings), &[TeamAggregate]
// outputs: <out_dir>/monthly_team_metrics_<start>_to_<end>.csv; stdout table
// side_effects: Creates out_dir when missing; writes one file; prints to stdout
// invariants:
// - Header row and column order are fixed; no index column
// - File name reuses the window strings verbatim
// - Whole floats render with one decimal (50.0), others with the shortest round-trip form
// errors: Directory creation and file writes propagate with the path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::model::TeamAggregate;

pub const CSV_HEADERS: [&str; 7] = [
  "Team",
  "Total PRs",
  "Mrg PRs",
  "Total Add",
  "Total Del",
  "Mg R %",
  "Avg Cyc T (d)",
];

pub fn report_file_name(start_date: &str, end_date: &str) -> String {
  format!("monthly_team_metrics_{}_to_{}.csv", start_date, end_date)
}

pub fn format_float(v: f64) -> String {
  if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
    format!("{:.1}", v)
  } else {
    format!("{}", v)
  }
}

fn csv_field(raw: &str) -> String {
  if raw.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", raw.replace('"', "\"\""))
  } else {
    raw.to_string()
  }
}

fn row_cells(row: &TeamAggregate) -> [String; 7] {
  [
    row.team.clone(),
    row.total_prs.to_string(),
    row.merged_prs.to_string(),
    row.total_additions.to_string(),
    row.total_deletions.to_string(),
    format_float(row.merge_rate_percent),
    format_float(row.avg_cycle_time_days),
  ]
}

pub fn render_csv(rows: &[TeamAggregate]) -> String {
  let mut out = CSV_HEADERS.join(",");
  out.push('\n');

  for row in rows {
    let cells: Vec<String> = row_cells(row).iter().map(|c| csv_field(c)).collect();
    out.push_str(&cells.join(","));
    out.push('\n');
  }

  out
}

/// Right-aligned text table with the CSV headers.
pub fn render_table(rows: &[TeamAggregate]) -> String {
  let body: Vec<[String; 7]> = rows.iter().map(row_cells).collect();

  let mut widths: Vec<usize> = CSV_HEADERS.iter().map(|h| h.chars().count()).collect();
  for cells in &body {
    for (w, c) in widths.iter_mut().zip(cells.iter()) {
      *w = (*w).max(c.chars().count());
    }
  }

  let line = |cells: &[&str]| -> String {
    cells
      .iter()
      .zip(&widths)
      .map(|(c, w)| format!("{:>width$}", c, width = *w))
      .collect::<Vec<_>>()
      .join("  ")
  };

  let mut lines = vec![line(&CSV_HEADERS)];
  for cells in &body {
    let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
    lines.push(line(&refs));
  }

  lines.join("\n")
}

/// Write the CSV under `cfg.out_dir`, creating the directory when needed.
pub fn write_report(cfg: &Config, rows: &[TeamAggregate]) -> Result<PathBuf> {
  std::fs::create_dir_all(&cfg.out_dir).with_context(|| format!("creating output directory {}", cfg.out_dir.display()))?;

  let path = cfg.out_dir.join(report_file_name(&cfg.start_date, &cfg.end_date));
  std::fs::write(&path, render_csv(rows)).with_context(|| format!("writing report {}", path.display()))?;

  Ok(path)
}

pub fn echo_report(rows: &[TeamAggregate], path: &Path) {
  println!("\n--- FINAL REPORT ---");
  println!("{}", render_table(rows));
  println!("\nReport successfully saved to {}", path.display());
}
