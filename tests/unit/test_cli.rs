//! Binary tests for the `typist` command
//!
//! Each run gets an empty working directory and HOME so no stray
//! `typist.toml` is picked up.

use assert_cmd::Command;
use predicates::prelude::*;

fn typist(dir: &tempfile::TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("typist").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("TYPIST_PHRASES")
        .env_remove("TYPIST_TYPING_DELAY_MS")
        .env_remove("TYPIST_DELETING_DELAY_MS")
        .env_remove("TYPIST_HOLD_DELAY_MS")
        .env_remove("TYPIST_SPEED");
    cmd
}

#[test]
fn test_cli_version() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir).arg("--version").assert().success();
}

#[test]
fn test_cli_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("frames"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_frames_text_output() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .args(["frames", "--phrase", "Hi"])
        .assert()
        .success()
        .stdout("    80ms  \"H\"\n   900ms  \"Hi\"\n    50ms  \"H\"\n    50ms  \"\"\n");
}

#[test]
fn test_frames_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = typist(&dir)
        .args(["frames", "--json", "--cycles", "2", "--phrase", "A", "--phrase", "B"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let frames: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let texts: Vec<&str> = frames
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["A", "", "B", "", "A", "", "B", ""]);
    assert_eq!(frames[0]["delay_ms"], 900);
}

#[test]
fn test_frames_reads_local_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("typist.toml"),
        "[typing]\nphrases = [\"Z\"]\nhold_delay_ms = 7\n",
    )
    .unwrap();
    typist(&dir)
        .arg("frames")
        .assert()
        .success()
        .stdout(predicate::str::contains("7ms  \"Z\""));
}

#[test]
fn test_env_override_applies() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .env("TYPIST_PHRASES", "Q")
        .env("TYPIST_DELETING_DELAY_MS", "3")
        .arg("frames")
        .assert()
        .success()
        .stdout(predicate::str::contains("3ms  \"\""));
}

#[test]
fn test_config_prints_toml() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .args(["config", "--speed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[typing]"))
        .stdout(predicate::str::contains("speed = 2.0"));
}

#[test]
fn test_empty_phrase_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .args(["frames", "--phrase", ""])
        .assert()
        .code(2);
}

#[test]
fn test_missing_config_file_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .args(["frames", "--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope.toml"));
}

#[test]
fn test_run_plain_for_zero_seconds() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .args(["run", "--plain", "--duration-secs", "0", "--phrase", "Hi"])
        .assert()
        .success();
}

#[test]
fn test_frames_rejects_huge_cycle_count() {
    let dir = tempfile::tempdir().unwrap();
    typist(&dir)
        .args(["frames", "--cycles", "18446744073709551615", "--phrase", "Hi"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--cycles"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_frames_streams_many_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let output = typist(&dir)
        .args(["frames", "--cycles", "10000", "--phrase", "Hi"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout.iter().filter(|&&b| b == b'\n').count(), 40_000);
}
