//! CLI end-to-end tests
//!
//! Tests for the episort command-line interface.

use predicates::prelude::*;
use std::fs;
use assert_cmd::Command;
use tempfile::tempdir;

/// Get a command for the episort binary
#[allow(deprecated)]
fn episort_cmd() -> Command {
    let mut cmd = Command::cargo_bin("episort").unwrap();
    cmd.env_remove("BOT_TOKEN").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = episort_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = episort_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("episort"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = episort_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("episort "));
}

#[test]
fn test_cli_extract_season_episode() {
    let mut cmd = episort_cmd();
    cmd.args(["extract", "Show.s02_e07.720p.mkv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Season: 2"))
        .stdout(predicate::str::contains("Episode: 7"));
}

#[test]
fn test_cli_extract_unparseable() {
    let mut cmd = episort_cmd();
    cmd.args(["extract", "trailer.mkv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Season: 999 (unparseable)"));
}

#[test]
fn test_cli_analyze_names() {
    let mut cmd = episort_cmd();
    cmd.args(["analyze", "[E05]clip.mp4", "E12.mp4", "07.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("S01E05 - [E05]clip.mp4"))
        .stdout(predicate::str::contains("S01: E6, E8, E9, E10, E11"));
}

#[test]
fn test_cli_analyze_json() {
    let output = episort_cmd()
        .args(["analyze", "--json", "Show.S01E03.mkv", "Show S01E01.mkv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sorted"][0]["name"], "Show S01E01.mkv");
    assert_eq!(json["sorted"][0]["identity"]["episode"], 1);
    assert_eq!(json["sorted"][1]["unparseable"], false);
    assert_eq!(json["missing"]["1"]["ranges"][0]["start"], 2);
}

#[test]
fn test_cli_analyze_from_file() {
    let temp = tempdir().unwrap();
    let names = temp.path().join("names.txt");
    fs::write(&names, "E02.mkv\n\nE01.mkv\nrandomfile.mkv\n").unwrap();

    let mut cmd = episort_cmd();
    cmd.args(["analyze", "--file", names.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("S01E01 - E01.mkv\nS01E02 - E02.mkv"))
        .stdout(predicate::str::contains("None 🎉"));
}

#[test]
fn test_cli_analyze_from_stdin() {
    let mut cmd = episort_cmd();
    cmd.arg("analyze")
        .write_stdin("S01E02.mkv\nS01E01.mkv\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("S01E01 - S01E01.mkv"));
}

#[test]
fn test_cli_validate_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("episort.toml");
    fs::write(
        &config_file,
        r#"
[telegram]
token = "1:abc"

[delivery]
clear_on_failure = false
"#,
    )
    .unwrap();

    let mut cmd = episort_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Clear on failure: false"))
        .stdout(predicate::str::contains("Token: configured"));
}

#[test]
fn test_cli_validate_rejects_bad_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("episort.toml");
    fs::write(&config_file, "[delivery]\nper_second = 0\n").unwrap();

    let mut cmd = episort_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("per_second"));
}

#[test]
fn test_cli_run_without_token_fails() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("episort.toml");
    fs::write(&config_file, "").unwrap();

    let mut cmd = episort_cmd();
    cmd.args(["run", "--config", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BOT_TOKEN"));
}
