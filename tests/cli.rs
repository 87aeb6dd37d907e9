use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TOKYO: &str = r#"
title: Spring in Tokyo
destinations: [Tokyo]
start_date: 2026-03-01
end_date: 2026-03-07
travelers: 2
budget:
  total: 20000
preferences:
  foodTypes: [sushi, ramen]
"#;

fn tripcrew(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tripcrew").unwrap();
    cmd.current_dir(dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("DASHSCOPE_API_KEY");
    cmd
}

fn workspace(trip: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("trip.yaml"), trip).unwrap();
    dir
}

#[test]
fn schema_prints_config_schema() {
    let dir = TempDir::new().unwrap();
    tripcrew(dir.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout_sec"))
        .stdout(predicate::str::contains("dashscope"));
}

#[test]
fn schema_prints_trip_schema() {
    let dir = TempDir::new().unwrap();
    tripcrew(dir.path())
        .args(["schema", "--trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("destinations"))
        .stdout(predicate::str::contains("start_date"));
}

#[test]
fn agents_lists_roster_without_secrets() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tripcrew.yaml"),
        r#"
model:
  provider: openai
  model: gpt-4o
agents:
  planner:
    provider: anthropic
    model: claude-sonnet-4-5
    api_key: sk-ant-secret
"#,
    )
    .unwrap();

    tripcrew(dir.path())
        .arg("agents")
        .assert()
        .success()
        .stdout(predicate::str::contains("transport"))
        .stdout(predicate::str::contains("$OPENAI_API_KEY"))
        .stdout(predicate::str::contains("claude-sonnet-4-5"))
        .stdout(predicate::str::contains("https://api.anthropic.com"))
        .stdout(predicate::str::contains("sk-ant-secret").not());
}

#[test]
fn plan_dry_run_shows_trip_analysis() {
    let dir = workspace(TOKYO);
    tripcrew(dir.path())
        .args(["plan", "--trip", "trip.yaml", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring in Tokyo"))
        .stdout(predicate::str::contains("7 days"))
        .stdout(predicate::str::contains("luxury tier"))
        .stdout(predicate::str::contains("planner"));

    assert!(!dir.path().join("reports").exists());
}

#[test]
fn plan_rejects_invalid_trip() {
    let dir = workspace(
        r#"
destinations: [Tokyo]
start_date: 2026-03-07
end_date: 2026-03-01
budget:
  total: 1000
"#,
    );
    tripcrew(dir.path())
        .args(["plan", "--trip", "trip.yaml", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("before start date"));
}

#[test]
fn plan_rejects_unknown_agent_in_config() {
    let dir = workspace(TOKYO);
    fs::write(
        dir.path().join("tripcrew.yaml"),
        "agents:\n  weather:\n    model: gpt-4o\n",
    )
    .unwrap();

    tripcrew(dir.path())
        .args(["plan", "--trip", "trip.yaml", "--dry-run"])
        .assert()
        .failure();
}

#[test]
fn plan_without_credentials_fails_and_records_outcome() {
    let dir = workspace(TOKYO);
    tripcrew(dir.path())
        .args(["plan", "--trip", "trip.yaml", "--report-dir", "out", "--events"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""event":"started""#))
        .stdout(predicate::str::contains(r#""event":"failed""#))
        .stderr(predicate::str::contains("OPENAI_API_KEY"));

    let dated = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let json = fs::read_dir(&dated)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|path| path.extension().is_some_and(|ext| ext == "json"))
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(json).unwrap()).unwrap();
    assert_eq!(report["outcome"]["success"], false);
}
