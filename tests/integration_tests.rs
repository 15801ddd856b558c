use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cmd(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("chromatix");
    cmd.current_dir(dir)
        .arg("--log-file")
        .arg(dir.join("test.log"));
    cmd
}

#[test]
fn test_cli_help() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--interval-ms"))
        .stdout(predicate::str::contains("--reset"));
}

#[test]
fn test_cli_lists_builtin_swatches() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pastel-blue"))
        .stdout(predicate::str::contains("Pastel Blue (relaxing)"))
        .stdout(predicate::str::contains("#ff7e5f -> #feb47b"))
        .stdout(predicate::str::contains("●").not());
}

#[test]
fn test_cli_list_marks_persisted_selection() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(
        &state,
        r##"{"chromatix.selection-list": "[\"mint-green\"]", "chromatix.last-gradient": "#a8e6cf"}"##,
    )
    .unwrap();

    let output = cmd(dir.path())
        .arg("--state-file")
        .arg(&state)
        .arg("--list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let marked: Vec<&str> = stdout.lines().filter(|l| l.starts_with('●')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("mint-green"));
    assert!(stdout.contains("background: #a8e6cf"));
}

#[test]
fn test_cli_reset_clears_only_owned_keys() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(
        &state,
        r#"{"chromatix.selection-list": "[\"a\",\"b\"]", "unrelated": "kept"}"#,
    )
    .unwrap();

    cmd(dir.path())
        .arg("--state-file")
        .arg(&state)
        .arg("--reset")
        .assert()
        .success()
        .stderr(predicate::str::contains("Cleared persisted state"));

    let content = std::fs::read_to_string(&state).unwrap();
    assert!(!content.contains("chromatix.selection-list"));
    assert!(content.contains("unrelated"));
}

#[test]
fn test_cli_reset_with_foreign_numeric_value() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(
        &state,
        r##"{"chromatix.last-gradient": "#ffffff", "editor.size": 12}"##,
    )
    .unwrap();

    cmd(dir.path())
        .arg("--state-file")
        .arg(&state)
        .arg("--reset")
        .assert()
        .success();

    let content = std::fs::read_to_string(&state).unwrap();
    assert!(!content.contains("chromatix.last-gradient"));
    assert!(content.contains("\"editor.size\": 12"));
}

#[test]
fn test_cli_save_config() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("saved.toml");

    cmd(dir.path())
        .args(["--interval-ms", "1200", "--save-config"])
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("interval_ms = 1200"));
    assert!(content.contains("[[swatches]]"));
}

#[test]
fn test_cli_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[carousel]\ninterval_ms = 0\n").unwrap();

    cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_ms"));
}

#[test]
fn test_cli_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["--config", "nope.toml", "--list"])
        .assert()
        .failure();
}

#[test]
fn test_cli_completions() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chromatix"));
}
