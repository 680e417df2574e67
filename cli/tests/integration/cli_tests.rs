//! Integration tests for the CLI structure and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agentic(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentic"));
    cmd.env("NO_COLOR", "1")
        .env("AGENTIC_HOME", home.path())
        .env_remove("AGENTIC_CONFIG")
        .env("AGENTIC_API_URL", "http://127.0.0.1:9");
    cmd
}

fn home() -> TempDir {
    TempDir::new().expect("temp dir")
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    let home = home();
    agentic(&home)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Browse, build and run no-code AI agents"));
}

#[test]
fn test_cli_help_flag_shows_help() {
    let home = home();
    agentic(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    let home = home();
    agentic(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agentic"));
}

#[test]
fn test_version_command_shows_version() {
    let home = home();
    agentic(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agentic 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let home = home();
    let output = agentic(&home)
        .args(["version", "--json"])
        .output()
        .expect("run agentic");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["version"], "0.1.0");
}

// --- Command hierarchy tests ---

#[test]
fn test_help_lists_every_top_level_command() {
    let home = home();
    let assert = agentic(&home).arg("--help").assert().success();
    for command in [
        "agents", "history", "analytics", "login", "logout", "whoami", "profile", "teams",
        "config", "version",
    ] {
        Assert::new(assert.get_output().clone()).stdout(predicate::str::contains(command));
    }
}

#[test]
fn test_agents_help_lists_subcommands() {
    let home = home();
    let assert = agentic(&home).args(["agents", "--help"]).assert().success();
    for sub in ["list", "show", "run", "create", "recent", "categories"] {
        Assert::new(assert.get_output().clone()).stdout(predicate::str::contains(sub));
    }
}

#[test]
fn test_analytics_help_lists_subcommands() {
    let home = home();
    let assert = agentic(&home).args(["analytics", "--help"]).assert().success();
    for sub in ["summary", "top", "categories", "dashboard", "usage", "export"] {
        Assert::new(assert.get_output().clone()).stdout(predicate::str::contains(sub));
    }
}

#[test]
fn test_global_flags_accepted_after_subcommand() {
    let home = home();
    agentic(&home)
        .args(["version", "--quiet", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_command_fails() {
    let home = home();
    agentic(&home)
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_errors_in_json_mode_are_json_objects() {
    let home = home();
    let output = agentic(&home)
        .args(["history", "--json"])
        .output()
        .expect("run agentic");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["error"], true);
    assert!(
        value["message"]
            .as_str()
            .expect("message")
            .contains("Not logged in")
    );
}
