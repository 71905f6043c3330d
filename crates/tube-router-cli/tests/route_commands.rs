use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/london_minimal.json")
        .canonicalize()
        .expect("fixture network present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("tube-router-cli");
    cmd.env("TUBE_ROUTER_DATA", fixture_path())
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn route_prints_text_summary() {
    cli()
        .args(["route", "Elephant & Castle", "Old Street"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Route from Elephant & Castle to Old Street (8 min, 0 transfers; algorithm: dijkstra):",
        ))
        .stdout(predicate::str::contains(" STRT  Elephant & Castle"))
        .stdout(predicate::str::contains(" GOAL  Old Street (Northern Line, 2 min)"));
}

#[test]
fn a_star_algorithm_is_supported() {
    cli()
        .args(["route", "Covent Garden", "Green Park", "--algorithm", "a-star"])
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: a-star"))
        .stdout(predicate::str::contains("4 min"));
}

#[test]
fn basic_format_outputs_minimal_path() {
    cli()
        .args(["--format", "basic", "route", "Covent Garden", "Green Park"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ Covent Garden"))
        .stdout(predicate::str::contains("| Leicester Square"))
        .stdout(predicate::str::contains("- Green Park"));
}

#[test]
fn plain_format_numbers_stations_and_lists_legs() {
    cli()
        .args(["--format", "plain", "route", "Elephant & Castle", "Old Street"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Route: Elephant & Castle -> Old Street (8 min, 0 transfers, algorithm: dijkstra)",
        ))
        .stdout(predicate::str::contains("  0: Elephant & Castle"))
        .stdout(predicate::str::contains("  5: Old Street"))
        .stdout(predicate::str::contains(
            "Elephant & Castle -> Borough (Northern Line, 2m)",
        ));
}

#[test]
fn json_format_is_machine_readable() {
    let output = cli()
        .args(["route", "Elephant & Castle", "Old Street", "--format", "json"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["total_minutes"], 8);
    assert_eq!(value["transfers"], 0);
    assert_eq!(value["algorithm"], "dijkstra");
    assert_eq!(value["steps"].as_array().map(Vec::len), Some(6));
}

#[test]
fn transfer_penalty_changes_the_route() {
    cli()
        .args([
            "--format",
            "basic",
            "route",
            "South Kensington",
            "Green Park",
            "--transfer-penalty",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Knightsbridge"))
        .stdout(predicate::str::contains("7 min with 0 transfers"));
}

#[test]
fn same_station_route_is_trivial() {
    cli()
        .args(["--format", "basic", "route", "Covent Garden", "Covent Garden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ Covent Garden"))
        .stdout(predicate::str::contains("0 min with 0 transfers"));
}

#[test]
fn show_stats_prints_counters() {
    cli()
        .args(["route", "Bank", "Angel", "--show-stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search: expanded"));
}

#[test]
fn unknown_station_error_is_friendly() {
    cli()
        .args(["route", "Covent Gardn", "Bank"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown station 'Covent Gardn'."))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("'Covent Garden'"));
}

#[test]
fn unknown_station_without_close_match() {
    cli()
        .args(["route", "Miaow Park", "South Kensington"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown station 'Miaow Park'."));
}

#[test]
fn route_not_found_error_names_both_stations() {
    cli()
        .args(["route", "Bank", "Kensington (Olympia)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No route found between Bank and Kensington (Olympia).",
        ));
}

#[test]
fn invalid_heuristic_speed_is_rejected() {
    cli()
        .args([
            "route",
            "Bank",
            "Angel",
            "--algorithm",
            "a-star",
            "--heuristic-max-kmph",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("heuristic speed"));
}

#[test]
fn missing_data_file_reports_path() {
    let dir = tempdir().expect("create temp dir");
    let missing = dir.path().join("absent.json");
    cli()
        .arg("--data")
        .arg(&missing)
        .args(["route", "Bank", "Angel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load network from"));
}
