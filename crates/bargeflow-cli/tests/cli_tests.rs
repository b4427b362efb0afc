//! End-to-end tests for the `bargeflow-cli` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

fn cli() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("bargeflow-cli");
    cmd.env("RUST_LOG", "error").env("NO_COLOR", "1");
    cmd
}

fn reference_json() -> Value {
    let text =
        fs::read_to_string(fixtures_dir().join("reference_scenario.json")).expect("read fixture");
    serde_json::from_str(&text).expect("parse fixture")
}

fn write_scenario(dir: &Path, scenario: &Value) -> PathBuf {
    let path = dir.join("scenario.json");
    fs::write(&path, serde_json::to_string_pretty(scenario).expect("serialize"))
        .expect("write scenario");
    path
}

#[test]
fn template_prints_reference_scenario_json() {
    let output = cli().arg("template").output().expect("run template");
    assert!(output.status.success());

    let printed: Value = serde_json::from_slice(&output.stdout).expect("template is JSON");
    assert_eq!(printed["available_days"], Value::from(330.0));
    assert_eq!(
        printed["depth_profile"].as_array().map(Vec::len),
        Some(12)
    );
}

#[test]
fn convoy_reports_arrangement() {
    cli()
        .arg("convoy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Convoy 2x3 (6 hulls)"))
        .stdout(predicate::str::contains("3.00 m depth, 2.50 m draft"));
}

#[test]
fn simulate_json_has_twelve_months() {
    let output = cli()
        .args(["simulate", "--format", "json"])
        .output()
        .expect("run simulate");
    assert!(output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).expect("simulate JSON");
    assert_eq!(result["months"].as_array().map(Vec::len), Some(12));
    assert_eq!(result["arrangement"]["rows"], Value::from(2));
    assert!(result["unit_cost"].as_f64().expect("finite unit cost") > 0.0);
}

#[test]
fn simulate_reads_scenario_and_depth_files() {
    let scenario = fixtures_dir().join("reference_scenario.json");
    let depths = fixtures_dir().join("dry_season_profile.csv");
    cli()
        .arg("--scenario")
        .arg(&scenario)
        .arg("--depths")
        .arg(&depths)
        .arg("simulate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit cost:"))
        .stdout(predicate::str::contains("Jan"));
}

#[test]
fn simulate_rejects_speed_with_monthly_speeds() {
    cli()
        .args([
            "simulate",
            "--speed",
            "5",
            "--monthly-speeds",
            "5,5,5,5,5,5,5,5,5,5,5,5",
        ])
        .assert()
        .failure();
}

#[test]
fn fleet_sizes_for_demand() {
    cli()
        .args(["fleet", "--demand", "10000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convoys needed:    28"));
}

#[test]
fn fleet_rejects_non_positive_demand() {
    cli()
        .args(["fleet", "--demand", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("demand"));
}

#[test]
fn optimize_narrow_grid_finds_best_design() {
    cli()
        .args([
            "optimize",
            "--min-design-speed",
            "4.7",
            "--max-design-speed",
            "4.9",
            "--sequential",
            "--curve",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Best design: 4.8 kn"))
        .stdout(predicate::str::contains("Feasible designs:  3 (0 infeasible)"));
}

#[test]
fn invalid_scenario_exits_with_error() {
    let dir = TempDir::new().expect("temp dir");
    let mut scenario = reference_json();
    scenario["available_days"] = Value::from(400.0);
    let path = write_scenario(dir.path(), &scenario);

    cli()
        .arg("--scenario")
        .arg(&path)
        .arg("convoy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("scenario failed validation"));
}

#[test]
fn missing_scenario_file_exits_with_error() {
    let dir = TempDir::new().expect("temp dir");
    cli()
        .arg("--scenario")
        .arg(dir.path().join("absent.json"))
        .arg("simulate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load scenario"));
}

#[test]
fn unviable_scenario_is_reported_not_failed() {
    let dir = TempDir::new().expect("temp dir");
    let mut scenario = reference_json();
    scenario["depth_profile"][8] = Value::from(0.6);
    let path = write_scenario(dir.path(), &scenario);

    cli()
        .arg("--scenario")
        .arg(&path)
        .args(["optimize", "--min-design-speed", "5", "--max-design-speed", "5.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No viable design found"));
}
