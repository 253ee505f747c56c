//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Config reads
//! and writes go to the development data directory.

use std::process::Command;

const TOML_INPUT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/input.toml");
const JSON_INPUT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/exams.json");
const WEDNESDAY: &str = "2026-03-04";

/// Run a CLI command and return output.
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "studyload-cli", "--"])
        .args(args)
        .env("STUDYLOAD_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_plan_json() {
    let plan = run_json(&["plan", "-i", TOML_INPUT, "--today", WEDNESDAY, "--json"]);

    assert_eq!(plan["week_start"], "2026-03-02");
    assert_eq!(plan["weekly_budget_min"], 840);
    assert_eq!(plan["days"].as_array().unwrap().len(), 7);

    let allocations = plan["allocations"].as_array().unwrap();
    assert_eq!(allocations.len(), 2);
    assert_eq!(allocations[0]["exam_id"], "calc");
    let total: u64 = allocations
        .iter()
        .map(|a| a["target_min"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 840);
}

#[test]
fn test_plan_text() {
    let (code, stdout, _) = run_cli(&["plan", "-i", TOML_INPUT, "--today", WEDNESDAY]);
    assert_eq!(code, 0, "Plan failed");
    assert!(stdout.contains("Week of 2026-03-02"));
    assert!(stdout.contains("Calculus I"));
    assert!(stdout.contains("Sunday 2026-03-08  0/0 min"));
}

#[test]
fn test_today_lists_tasks() {
    let (code, stdout, _) = run_cli(&["today", "-i", TOML_INPUT, "--today", WEDNESDAY]);
    assert_eq!(code, 0, "Today failed");
    assert!(stdout.starts_with("2026-03-04"));
    assert!(stdout.contains("[ ]"));

    let tasks = run_json(&["today", "-i", TOML_INPUT, "--today", "2026-03-08", "--json"]);
    assert!(tasks.as_array().unwrap().is_empty());
}

#[test]
fn test_readiness_json() {
    let estimates = run_json(&["readiness", "-i", JSON_INPUT, "--today", WEDNESDAY, "--json"]);
    let estimates = estimates.as_array().unwrap();
    assert_eq!(estimates.len(), 2);
    for est in estimates {
        let percent = est["percent"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&percent));
        assert!(["on_track", "borderline", "at_risk"].contains(&est["badge"].as_str().unwrap()));
    }
}

#[test]
fn test_simulate_is_reproducible() {
    let args = [
        "simulate", "-i", TOML_INPUT, "--today", WEDNESDAY, "--runs", "5", "--seed", "11",
        "--horizon", "21",
    ];
    let first = run_json(&args);
    let second = run_json(&args);

    assert_eq!(first, second);
    assert_eq!(first["runs"], 5);
    assert_eq!(first["dates"].as_array().unwrap().len(), 21);
    assert_eq!(first["median"]["calc"].as_array().unwrap().len(), 21);
}

#[test]
fn test_simulate_scenario_comparison() {
    let cmp = run_json(&[
        "simulate", "-i", TOML_INPUT, "--today", WEDNESDAY, "--runs", "3", "--drop", "hist",
        "--delta-hours", "-2",
    ]);

    assert!(cmp["baseline"]["median"]["hist"].is_array());
    assert!(cmp["scenario"]["median"]["hist"].is_null());
    assert!(cmp["final_delta"]["calc"].is_number());
}

#[test]
fn test_simulate_single_run() {
    let run = run_json(&["simulate", "-i", TOML_INPUT, "--today", WEDNESDAY, "--single", "--seed", "3"]);
    assert_eq!(run["seed"], 3);
    assert!(run["series"]["calc"].is_array());
}

#[test]
fn test_config_get() {
    let (code, stdout, _) = run_cli(&["config", "get", "monte_carlo.parallel"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_unknown_key_fails() {
    let (code, _, stderr) = run_cli(&["config", "get", "profile.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_missing_input_fails() {
    let (code, _, stderr) = run_cli(&["plan", "-i", "does-not-exist.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_completions() {
    let (code, stdout, _) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("studyload"));
}
