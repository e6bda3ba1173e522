//! Integration tests for the CLI interface
//!
//! Tests the main entry point, command parsing and exit codes

mod common;

use assert_cmd::Command;
use common::{batch, scenario_batch, TestContextBuilder};
use predicates::prelude::*;

fn tweetflow() -> Command {
    Command::cargo_bin("tweetflow").unwrap()
}

#[test]
fn test_cli_help_flag() {
    tweetflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("schedule"));
}

#[test]
fn test_run_help() {
    tweetflow()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--enforce-validation"));
}

#[test]
fn test_invalid_command() {
    tweetflow()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_validate_clean_file() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?
        .with_batch(&batch(&["1,a,x,08/11/2020 10:01,en,0,0,2,1"]))
        .build()?;

    tweetflow()
        .arg("validate")
        .arg(ctx.batch_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no findings"));
    Ok(())
}

#[test]
fn test_validate_dirty_file_exits_with_validation_code() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?
        .with_batch(&scenario_batch())
        .build()?;

    tweetflow()
        .arg("validate")
        .arg(ctx.batch_path())
        .assert()
        .code(8)
        .stdout(predicate::str::contains(
            "Column 'language' contains invalid language codes.",
        ));
    Ok(())
}

#[test]
fn test_validate_json_output() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?
        .with_batch(&scenario_batch())
        .build()?;

    let output = tweetflow()
        .arg("validate")
        .arg(ctx.batch_path())
        .arg("--json")
        .output()?;
    assert_eq!(output.status.code(), Some(8));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let findings = report["findings"].as_array().expect("findings array");
    assert_eq!(findings[0], "Dataset contains missing values.");
    Ok(())
}

#[test]
fn test_run_with_config_writes_summary() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?
        .with_batch(&scenario_batch())
        .with_config("")
        .build()?;

    tweetflow()
        .arg("run")
        .arg("-c")
        .arg(ctx.config_path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Processed 4 record(s) into 2 hourly row(s)",
        ));

    assert!(ctx.read_file(common::SUMMARY_FILE)?.contains("10,4.0,1.0,a"));
    Ok(())
}

#[test]
fn test_run_with_path_overrides() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?
        .with_batch(&scenario_batch())
        .build()?;
    let output = ctx.path().join("out.csv");

    tweetflow()
        .arg("run")
        .arg("--input")
        .arg(ctx.batch_path())
        .arg("--output")
        .arg(&output)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hours_written\": 2"));

    assert!(output.exists());
    Ok(())
}

#[test]
fn test_run_enforced_validation_fails() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?
        .with_batch(&scenario_batch())
        .with_config("")
        .build()?;

    tweetflow()
        .arg("run")
        .arg("-c")
        .arg(ctx.config_path())
        .arg("--enforce-validation")
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Batch failed validation"));

    assert!(!ctx.summary_path().exists());
    Ok(())
}

#[test]
fn test_run_missing_config_exits_with_config_code() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?.build()?;

    tweetflow()
        .arg("run")
        .arg("-c")
        .arg(ctx.config_path())
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn test_run_missing_source_exits_with_source_code() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?.with_config("").build()?;

    tweetflow()
        .arg("run")
        .arg("-c")
        .arg(ctx.config_path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("tweets.csv"))
        .stderr(predicate::str::contains("[E2001] Source batch not found"));
    Ok(())
}

#[cfg(not(feature = "s3"))]
#[test]
fn test_run_with_disabled_backend_exits_with_config_code() -> anyhow::Result<()> {
    let ctx = TestContextBuilder::new()?
        .with_batch(&scenario_batch())
        .with_file("s3.toml", "[sink]\nbackend = \"s3\"\n")
        .build()?;

    tweetflow()
        .arg("run")
        .arg("-c")
        .arg(ctx.path().join("s3.toml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("[E1005]"));
    Ok(())
}
