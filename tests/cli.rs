// Integration tests for the matchlog CLI.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes, stdout output, and the persisted results table.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn matchlog() -> Command {
    Command::cargo_bin("matchlog").expect("binary should exist")
}

fn seed_workspace(root: &Path) {
    fs::create_dir(root.join("content")).expect("content dir should create");
    fs::write(
        root.join("weights.csv"),
        "metric,target,bonus\n\
         Kills,0,0\n\
         Kills,10,5\n\
         Kills,20,10\n",
    )
    .expect("weights should write");
}

#[test]
fn cli_version_flag() {
    matchlog()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("matchlog"));
}

#[test]
fn cli_help_flag() {
    matchlog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Match record scoring"));
}

#[test]
fn score_requires_file() {
    matchlog()
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn run_on_missing_root_fails_with_runtime_code() {
    matchlog()
        .args(["run", "/nonexistent/matchlog-root"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn run_scores_and_reports_each_new_file() {
    let root = TempDir::new().expect("temp dir should be created");
    seed_workspace(root.path());
    fs::write(root.path().join("content/game1.md"), "Kills: 15\nMap: Ascent\n")
        .expect("match file should write");

    matchlog()
        .arg("run")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Match Analysis for file: game1.md"))
        .stdout(predicate::str::contains("Kills: 15, Bonus: 7.50"))
        .stdout(predicate::str::contains("Total Score: 7.5"))
        .stdout(predicate::str::contains("processed 1 file(s)"));

    let output = fs::read_to_string(root.path().join("match_results.csv"))
        .expect("results table should exist");
    assert!(output.starts_with("Kills,Map,Score,Log,Filename"));
    assert!(output.contains("game1.md"));
}

#[test]
fn second_run_skips_already_scored_files() {
    let root = TempDir::new().expect("temp dir should be created");
    seed_workspace(root.path());
    fs::write(root.path().join("content/game1.md"), "Kills: 15\n")
        .expect("match file should write");

    matchlog().arg("run").arg(root.path()).assert().success();
    matchlog()
        .arg("run")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("processed 0 file(s)"))
        .stdout(predicate::str::contains("skipped 1 already scored"));

    let output = fs::read_to_string(root.path().join("match_results.csv"))
        .expect("results table should exist");
    assert_eq!(output.lines().count(), 2, "header plus exactly one row");
}

#[test]
fn malformed_headshot_aborts_the_run() {
    let root = TempDir::new().expect("temp dir should be created");
    seed_workspace(root.path());
    fs::write(root.path().join("content/game1.md"), "Headshot: twelve\n")
        .expect("match file should write");

    matchlog()
        .arg("run")
        .arg(root.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("parenthesized percentage"));
    assert!(!root.path().join("match_results.csv").exists());
}

#[test]
fn score_subcommand_prints_report_without_persisting() {
    let root = TempDir::new().expect("temp dir should be created");
    seed_workspace(root.path());
    let file = root.path().join("content/game1.md");
    fs::write(&file, "Kills: 25\n").expect("match file should write");

    matchlog()
        .arg("score")
        .arg(&file)
        .arg("--weights-file")
        .arg(root.path().join("weights.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Score: 10"));
    assert!(!root.path().join("match_results.csv").exists());
}

#[test]
fn weights_subcommand_lists_sorted_tiers() {
    let root = TempDir::new().expect("temp dir should be created");
    seed_workspace(root.path());

    matchlog()
        .arg("weights")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Kills"))
        .stdout(predicate::str::contains("target 10 -> bonus 5"));
}

#[test]
fn run_honors_config_file_paths() {
    let root = TempDir::new().expect("temp dir should be created");
    fs::create_dir(root.path().join("matches")).expect("matches dir should create");
    fs::write(
        root.path().join("tiers.csv"),
        "metric,target,bonus\nKills,10,5\n",
    )
    .expect("weights should write");
    fs::write(
        root.path().join("matchlog.toml"),
        r#"
[paths]
content_dir = "matches"
weights_file = "tiers.csv"
output_file = "season.csv"
"#,
    )
    .expect("config should write");
    fs::write(root.path().join("matches/game1.md"), "Kills: 12\n")
        .expect("match file should write");

    matchlog()
        .arg("run")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("processed 1 file(s)"));
    assert!(root.path().join("season.csv").exists());
}
