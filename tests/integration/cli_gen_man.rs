use assert_cmd::Command;

#[test]
fn gen_man_outputs_troff_without_a_token() {
  let mut cmd = Command::cargo_bin("team-pr-metrics").unwrap();
  let out = cmd.env_remove("API_METRICS_KEY").arg("--gen-man").output().unwrap();
  assert!(out.status.success());
  let s = String::from_utf8_lossy(&out.stdout);
  assert!(s.contains(".TH"));
  assert!(s.contains("team\\-pr\\-metrics") || s.contains("team-pr-metrics"));
}
