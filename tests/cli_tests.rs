//! End-to-end CLI tests for agentup.
//!
//! These run the binary against scratch directories. PATH is emptied so the
//! managed tools always probe as missing, and AGENTUP_HOME keeps every
//! home-relative path inside the sandbox.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn agentup_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("agentup").unwrap();
    cmd.env("AGENTUP_HOME", home.path());
    cmd.env("PATH", "");
    cmd
}

fn git_project() -> TempDir {
    let project = TempDir::new().unwrap();
    fs::create_dir(project.path().join(".git")).unwrap();
    project
}

// =============================================================================
// GLOBAL FLAGS
// =============================================================================

#[test]
fn test_cli_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    agentup_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_cli_version_matches_crate() {
    let home = TempDir::new().unwrap();
    agentup_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// SETUP COMMAND TESTS
// =============================================================================

#[test]
fn test_cli_setup_piped_stdin_is_non_interactive() {
    let home = TempDir::new().unwrap();

    // stdin is not a terminal here, so setup must take the CI path: no
    // prompts to block on, and the config deploy phase is skipped.
    agentup_cmd(&home)
        .arg("setup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Config deployment skipped in CI mode"))
        .stdout(predicate::str::contains("Setup Complete"));
}

// =============================================================================
// INIT COMMAND TESTS
// =============================================================================

#[test]
fn test_cli_init_requires_git_repo() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    agentup_cmd(&home)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));

    assert!(!project.path().join(".agentup").exists());
}

#[test]
fn test_cli_init_seeds_project_state() {
    let home = TempDir::new().unwrap();
    let project = git_project();

    agentup_cmd(&home)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed"))
        .stdout(predicate::str::contains("agentup init complete"))
        .stdout(predicate::str::contains("Init Complete"));

    let state = fs::read_to_string(project.path().join(".agentup/init-state.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(parsed["tools"]["openspec"], false);
    assert_eq!(parsed["tools"]["trellis"], false);

    let doc = fs::read_to_string(project.path().join("CLAUDE.md")).unwrap();
    assert!(doc.contains("<!-- agentup-workflow -->"));
    assert!(doc.contains("<!-- agentup-workflow-end -->"));
}

#[test]
fn test_cli_init_is_idempotent_for_the_project_doc() {
    let home = TempDir::new().unwrap();
    let project = git_project();

    agentup_cmd(&home)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success();

    agentup_cmd(&home)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already contains agentup section"));

    let doc = fs::read_to_string(project.path().join("CLAUDE.md")).unwrap();
    assert_eq!(doc.matches("<!-- agentup-workflow -->").count(), 1);
}

#[test]
fn test_cli_init_appends_gitignore_entry_once() {
    let home = TempDir::new().unwrap();
    let project = git_project();
    fs::write(project.path().join(".gitignore"), "target\n").unwrap();

    agentup_cmd(&home)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success();
    agentup_cmd(&home)
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success();

    let gitignore = fs::read_to_string(project.path().join(".gitignore")).unwrap();
    assert_eq!(gitignore.matches(".agentup/").count(), 1);
    assert!(gitignore.starts_with("target\n"));
}
