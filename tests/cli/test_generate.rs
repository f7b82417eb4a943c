use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const WORKFLOW: &str = r#"
name: Docs
on:
  workflow_dispatch:
jobs:
  build:
    steps:
      - uses: actions/checkout@v4
"#;

fn workflowdoc() -> Command {
    let mut cmd = Command::cargo_bin("workflowdoc").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("WORKFLOWDOC_LOG_LEVEL")
        .env_remove("WORKFLOWDOC_CONSOLE_OUTPUT");
    cmd
}

#[test]
fn test_generate_writes_markdown_file() {
    let dir = tempdir().unwrap();
    let workflow_path = dir.path().join("docs.yml");
    fs::write(&workflow_path, WORKFLOW).unwrap();

    workflowdoc()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&workflow_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Generating markdown documentation for workflow",
        ))
        .stdout(predicate::str::contains("docs.yml.md"));

    let markdown = fs::read_to_string(dir.path().join("docs.yml.md")).unwrap();
    assert!(markdown.starts_with("# Docs\n"));
    assert!(markdown.contains("build>>actions/checkout@v4"));
}

#[test]
fn test_generate_missing_file_fails() {
    let dir = tempdir().unwrap();

    workflowdoc()
        .current_dir(dir.path())
        .args(["generate", "does-not-exist.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WFD-INPUT-001"));

    assert!(!dir.path().join("does-not-exist.yml.md").exists());
}

#[test]
fn test_generate_missing_name_fails_with_key() {
    let dir = tempdir().unwrap();
    let workflow_path = dir.path().join("nameless.yml");
    fs::write(&workflow_path, "on:\n  workflow_dispatch:\njobs: {}\n").unwrap();

    workflowdoc()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&workflow_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("WFD-FIELD-001"))
        .stderr(predicate::str::contains("'name'"));

    assert!(!dir.path().join("nameless.yml.md").exists());
}

#[test]
fn test_generate_requires_path() {
    workflowdoc().arg("generate").assert().failure();
}

#[test]
fn test_invalid_logging_config_fails_before_generation() {
    let dir = tempdir().unwrap();
    let workflow_path = dir.path().join("docs.yml");
    fs::write(&workflow_path, WORKFLOW).unwrap();
    fs::write(
        dir.path().join("workflowdoc.toml"),
        "[logging]\nconsole_output = \"syslog\"\n",
    )
    .unwrap();

    workflowdoc()
        .current_dir(dir.path())
        .arg("generate")
        .arg(&workflow_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));

    assert!(!dir.path().join("docs.yml.md").exists());
}

#[test]
fn test_help_lists_generate() {
    workflowdoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn test_version_command() {
    workflowdoc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("workflowdoc"));
}
