//! Integration tests for the `mentions` binary.
//!
//! Each test builds a small corpus in a temp directory and checks the
//! binary's stdout, stderr and exit status.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.md", "See **Target**");
    write(dir.path(), "b.md", "Also **Target** and **Other Page**");
    write(dir.path(), "target.md", "# Target\nNo mentions.");
    dir
}

fn mentions(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mentions"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run mentions")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn integration_help_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_mentions"))
        .arg("--help")
        .output()
        .expect("failed to run mentions");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mentions"));
    assert!(stdout.contains("Usage"));
}

#[test]
fn integration_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_mentions"))
        .arg("--version")
        .output()
        .expect("failed to run mentions");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version_pattern = regex::Regex::new(r"^mentions \d+\.\d+\.\d+$").unwrap();
    assert!(
        version_pattern.is_match(stdout.trim()),
        "unexpected version output: {stdout}"
    );
}

#[test]
fn integration_stats_text() {
    let dir = sample_corpus();
    let output = mentions(dir.path(), &["stats"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["pages: 3, distinct mentions: 2, avg mentions/page: 1.00"]
    );
}

#[test]
fn integration_stats_json() {
    let dir = sample_corpus();
    let output = mentions(dir.path(), &["--json", "stats"]);

    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total_pages"], 3);
    assert_eq!(stats["total_mentions"], 2);
    assert_eq!(stats["avg_mentions_per_page"], 1.0);
}

#[test]
fn integration_affected() {
    let dir = sample_corpus();
    let output = mentions(dir.path(), &["affected", "Target"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["a.md", "b.md"]);

    let output = mentions(dir.path(), &["affected", "Other Page", "Nobody"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["b.md"]);
}

#[test]
fn integration_affected_unknown_title_is_empty() {
    let dir = sample_corpus();
    let output = mentions(dir.path(), &["--json", "affected", "Nobody"]);

    assert!(output.status.success());
    let pages: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(pages.is_empty());
}

#[test]
fn integration_extract_single_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "page.md", "**Hi** **Job** **Zeta** **Job** [**Linked**](l.md)");

    let output = mentions(dir.path(), &["extract", dir.path().join("page.md").to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["Job", "Linked", "Zeta"]);
}

#[test]
fn integration_extract_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = mentions(dir.path(), &["extract", "does-not-exist.md"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.md"));
}

#[test]
fn integration_page_mentions() {
    let dir = sample_corpus();
    let output = mentions(dir.path(), &["page", "b.md"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["Other Page", "Target"]);
}

#[test]
fn integration_unknown_page_fails() {
    let dir = sample_corpus();
    let output = mentions(dir.path(), &["page", "missing.md"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.md"));
}

#[test]
fn integration_sync_json() {
    let dir = sample_corpus();
    let output = mentions(dir.path(), &["sync", "--json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["pages_scanned"], 3);
    assert_eq!(report["pages_added"], 3);
    assert_eq!(report["changed"].as_array().unwrap().len(), 3);
    assert!(report["affected"].as_array().unwrap().is_empty());
}

#[test]
fn integration_root_config_is_honoured() {
    let dir = sample_corpus();
    write(dir.path(), "mentions.toml", "min_mention_len = 7");

    let output = mentions(dir.path(), &["config"]);
    assert!(output.status.success());
    assert!(stdout_lines(&output).contains(&"min_mention_len = 7".to_string()));

    // "Target" is six characters, so it is no longer a mention.
    let output = mentions(dir.path(), &["affected", "Target"]);
    assert!(output.status.success());
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn integration_invalid_explicit_config_fails() {
    let dir = sample_corpus();
    write(dir.path(), "bad.toml", "extensions = [");

    let bad = dir.path().join("bad.toml");
    let output = mentions(dir.path(), &["--config", bad.to_str().unwrap(), "stats"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"));
}

#[test]
fn integration_missing_root_fails() {
    let dir = TempDir::new().unwrap();
    let output = mentions(&dir.path().join("nope"), &["stats"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a directory"));
}

#[test]
fn integration_root_after_subcommand() {
    let dir = sample_corpus();
    let output = Command::new(env!("CARGO_BIN_EXE_mentions"))
        .args(["affected", "Target", "--root"])
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run mentions");

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["a.md", "b.md"]);
}

#[test]
fn integration_closed_stdout_does_not_panic() {
    let dir = TempDir::new().unwrap();
    for i in 0..2000 {
        write(dir.path(), &format!("page{i:04}.md"), "**Target**");
    }

    let mut child = Command::new(env!("CARGO_BIN_EXE_mentions"))
        .arg("--root")
        .arg(dir.path())
        .args(["affected", "Target"])
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run mentions");
    drop(child.stdout.take());

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
    assert_ne!(output.status.code(), Some(101));
}
