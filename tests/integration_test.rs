//! Integration tests for the repostrap CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_cmd() -> Command {
    Command::cargo_bin("repostrap").unwrap()
}

/// A config with every remote action disabled, so plans stay local
fn local_config(name: &str) -> String {
    format!(
        r#"
[project]
name = "{name}"
description = "A test project"
owner = "acme"
repo_url = "https://github.com/acme/{name}"

[license]
kind = "MIT"
holder = "Acme Inc."
year = "2026"

[ruleset]
enabled = false

[pages]
enabled = false

[labels]
enabled = false
"#
    )
}

#[tokio::test]
async fn test_help_lists_commands() {
    get_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("apply"));
}

#[tokio::test]
async fn test_version_flag() {
    get_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repostrap"));
}

#[tokio::test]
async fn test_init_non_interactive_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(".repostrap.toml");

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive", "--skip-checks"])
        .assert()
        .success();

    assert!(config_path.exists(), "Configuration file should be created");

    // The written file round-trips through the loader
    let config = repostrap::config::Config::load_from_file(&config_path).unwrap();
    assert!(!config.project.name.is_empty());
    assert_eq!(config.license.kind, "MIT");
}

#[tokio::test]
async fn test_init_refuses_overwrite_without_force() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive", "--skip-checks"])
        .assert()
        .success();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive", "--skip-checks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[tokio::test]
async fn test_init_force_overwrites() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive", "--skip-checks"])
        .assert()
        .success();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--non-interactive", "--skip-checks", "--force"])
        .assert()
        .success();
}

#[tokio::test]
async fn test_plan_reports_pending_actions() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(root.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();

    get_cmd()
        .current_dir(root)
        .arg("plan")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("placeholder"))
        .stdout(predicate::str::contains("MIT"));
}

#[tokio::test]
async fn test_plan_succeeds_on_configured_repository() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(root.join("README.md"), "# widget\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT License ...").unwrap();

    get_cmd()
        .current_dir(root)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("fully configured"));
}

#[tokio::test]
async fn test_plan_json_output_is_parseable() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(root.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();

    let output = get_cmd()
        .current_dir(root)
        .args(["plan", "--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(json["actions"].as_array().is_some());
}

#[tokio::test]
async fn test_plan_filters_categories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(root.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();

    // Only the license action survives the filter
    get_cmd()
        .current_dir(root)
        .args(["plan", "--only", "license"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("MIT"))
        .stdout(predicate::str::contains("placeholder").not());
}

#[tokio::test]
async fn test_apply_dry_run_makes_no_changes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(root.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();

    get_cmd()
        .current_dir(root)
        .args(["apply", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.contains("{{PROJECT_NAME}}"));
    assert!(!root.join("LICENSE").exists());
}

#[tokio::test]
async fn test_apply_fills_placeholders_and_installs_license() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(
        root.join("README.md"),
        "# {{PROJECT_NAME}}\n\n{{PROJECT_DESCRIPTION}}\nby {{REPO_OWNER}}\n",
    )
    .unwrap();
    fs::write(root.join("CONTRIBUTING.md"), "Contribute to {{PROJECT_NAME}}!\n").unwrap();

    get_cmd()
        .current_dir(root)
        .args(["apply", "--yes", "--no-pr"])
        .assert()
        .success();

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(!readme.contains("{{"));
    assert!(readme.contains("# widget"));
    assert!(readme.contains("A test project"));
    assert!(readme.contains("by acme"));

    let contributing = fs::read_to_string(root.join("CONTRIBUTING.md")).unwrap();
    assert_eq!(contributing, "Contribute to widget!\n");

    let license = fs::read_to_string(root.join("LICENSE")).unwrap();
    assert!(license.contains("Copyright (c) 2026 Acme Inc."));
}

#[tokio::test]
async fn test_apply_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(root.join("README.md"), "# {{PROJECT_NAME}}\n").unwrap();

    get_cmd()
        .current_dir(root)
        .args(["apply", "--yes", "--no-pr"])
        .assert()
        .success();

    // A second run finds nothing left to do
    get_cmd()
        .current_dir(root)
        .args(["apply", "--yes", "--no-pr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No actions to perform"));
}

#[tokio::test]
async fn test_directory_flag_changes_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join(".repostrap.toml"), local_config("widget")).unwrap();
    fs::write(root.join("README.md"), "# widget\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT License ...").unwrap();

    get_cmd()
        .args(["-C", root.to_str().unwrap(), "plan"])
        .assert()
        .success();
}
