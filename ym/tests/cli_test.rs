//! Binary tests for the yamelinno command line

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCHEMA: &str = r#"
Setup:
  renderedName: Setup
  required: true
  children: keys
  keys:
    appName:
      renderedName: AppName
      required: true
"#;

fn yamelinno(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("yamelinno").expect("binary should build");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("YAMELINNO_TEMPLATES")
        .env_remove("YAMELINNO_SCHEMAS");
    cmd
}

fn project() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp.path().join("schema.yml"), SCHEMA).expect("Failed to write schema");
    fs::write(temp.path().join("app.yml"), "Setup:\n  appName: Demo\n").expect("Failed to write input");
    temp
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    yamelinno(temp.path())
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("yamelinno {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_missing_input_argument() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    yamelinno(temp.path()).assert().failure();
}

#[test]
fn test_invalid_flag() {
    let temp = project();
    yamelinno(temp.path()).args(["--invalid", "app.yml"]).assert().failure();
}

#[test]
fn test_compile_to_stdout_with_default_schema() {
    let temp = project();
    yamelinno(temp.path())
        .arg("app.yml")
        .assert()
        .success()
        .stdout("[Setup]\nAppName=\"Demo\"\n\n");
}

#[test]
fn test_compile_to_file() {
    let temp = project();
    yamelinno(temp.path())
        .args(["app.yml", "-o", "setup.iss", "-s", "schema.yml"])
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(temp.path().join("setup.iss")).expect("output should exist");
    assert_eq!(written, "[Setup]\nAppName=\"Demo\"\n\n");
}

#[test]
fn test_invalid_input_fails_without_output() {
    let temp = project();
    fs::write(temp.path().join("bad.yml"), "Setup:\n  appColor: red\n").expect("Failed to write input");

    yamelinno(temp.path())
        .args(["bad.yml", "-o", "setup.iss"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("appName"));

    assert!(!temp.path().join("setup.iss").exists());
}

#[test]
fn test_missing_schema_fails() {
    let temp = project();
    yamelinno(temp.path())
        .args(["app.yml", "--schema", "nope.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.yml"));
}

#[test]
fn test_config_file_schema_name() {
    let temp = project();
    fs::rename(temp.path().join("schema.yml"), temp.path().join("inno.yml")).expect("Failed to rename schema");
    fs::write(temp.path().join("custom.yml"), "schema:\n  file-name: inno.yml\n").expect("Failed to write config");

    yamelinno(temp.path())
        .args(["app.yml", "-c", "custom.yml"])
        .assert()
        .success()
        .stdout("[Setup]\nAppName=\"Demo\"\n\n");
}
