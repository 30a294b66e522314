//! Exit codes and stderr of the `gensheet` binary.
#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};

fn gensheet(args: &[&str], api_key: Option<&str>, cwd: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gensheet"));
    cmd.args(args).current_dir(cwd).env_clear();
    if let Some(key) = api_key {
        cmd.env("OPENAI_API_KEY", key);
    }
    cmd.output().unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn missing_key_exits_2_before_reading_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let output = gensheet(
        &["generate", "--prompts", "missing.json", "--out-root", "out"],
        None,
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Missing OPENAI_API_KEY"), "{err}");
    assert!(!err.contains("missing.json"), "{err}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn blank_key_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let output = gensheet(&["generate"], Some("   "), dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_prompt_file_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = gensheet(
        &["generate", "--prompts", "missing.json"],
        Some("sk-test"),
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("invalid prompt file"), "{err}");
    assert!(err.contains("missing.json"), "{err}");
}

#[test]
fn usage_error_does_not_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = gensheet(&["generate", "--bogus-flag"], Some("sk-test"), dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--bogus-flag"));
}

#[test]
fn help_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    let output = gensheet(&["--help"], None, dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("generate"));
}

#[test]
fn gallery_rerenders_from_manifest() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("generated.json"),
        r#"[{"id": 1, "title": "Bold T Mark", "prompt": "...", "file": "01-bold-t-mark.png"}]"#,
    )
    .unwrap();

    let output = gensheet(&["gallery", ".", "--preset", "lockups"], None, dir.path());
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert_eq!(html.matches("<figure>").count(), 1);
    assert!(html.contains("01-bold-t-mark.png"));
}

#[test]
fn gallery_without_manifest_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let output = gensheet(&["gallery", "."], None, dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("reading manifest"));
}
