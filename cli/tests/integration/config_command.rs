//! Integration tests for `agentic config` command.
//!
//! All filesystem-touching tests set `AGENTIC_CONFIG` to a temp path so they
//! never read or write `~/.agentic/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agentic(dir: &TempDir, config: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentic"));
    cmd.env("NO_COLOR", "1")
        .env("AGENTIC_HOME", dir.path())
        .env("AGENTIC_CONFIG", config)
        .env_remove("AGENTIC_API_URL");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// `agentic config show`
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_no_config_file_uses_defaults() {
    let (dir, path) = temp_config_path();
    agentic(&dir, &path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000"))
        .stdout(predicate::str::contains("api.timeout_secs"))
        .stdout(predicate::str::contains("AGENTIC_CONFIG"));
}

#[test]
fn test_config_show_does_not_create_file() {
    let (dir, path) = temp_config_path();
    agentic(&dir, &path).args(["config", "show"]).assert().success();
    assert!(
        !std::path::Path::new(&path).exists(),
        "show must not create the config file"
    );
}

#[test]
fn test_config_show_json() {
    let (dir, path) = temp_config_path();
    let output = agentic(&dir, &path)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["api"]["timeout_secs"], 30);
    assert_eq!(value["path"], path);
}

// ---------------------------------------------------------------------------
// `agentic config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_persists_value_readable_by_show() {
    let (dir, path) = temp_config_path();
    agentic(&dir, &path)
        .args(["config", "set", "api.url", "https://agents.example.com/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api.url"));
    agentic(&dir, &path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://agents.example.com"));
}

#[test]
fn test_config_set_unknown_key_returns_error_with_valid_keys() {
    let (dir, path) = temp_config_path();
    agentic(&dir, &path)
        .args(["config", "set", "security.level", "strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.url"));
}

#[test]
fn test_config_set_invalid_timeout_returns_error() {
    let (dir, path) = temp_config_path();
    agentic(&dir, &path)
        .args(["config", "set", "api.timeout_secs", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive number"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
#[cfg(unix)]
fn test_config_set_creates_file_with_0o600_permissions() {
    use std::os::unix::fs::PermissionsExt;
    let (dir, path) = temp_config_path();
    agentic(&dir, &path)
        .args(["config", "set", "api.timeout_secs", "45"])
        .assert()
        .success();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
