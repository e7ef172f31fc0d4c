//! End-to-end tests for the `hirematch` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn setup_config() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("hirematch.toml");
    fs::write(
        &config_path,
        r#"
[embedding]
provider = "disabled"

[logging]
level = "warn"
"#,
    )
    .unwrap();
    (tmp, config_path)
}

fn run_hirematch(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_hirematch"))
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run hirematch binary");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_search_ranks_seeded_pool() {
    let (_tmp, config_path) = setup_config();
    let (stdout, stderr, success) =
        run_hirematch(&config_path, &["search", "Java Spring Boot 5 years Pune"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);

    assert!(stdout.starts_with("filters: skills=Java,Spring"), "unexpected output: {}", stdout);
    let first = stdout
        .lines()
        .find(|l| l.starts_with("1. ["))
        .unwrap_or_default();
    assert!(first.contains("Ananya Mehra"), "unexpected output: {}", stdout);
    assert!(stdout.contains("keyword scoring"));
}

#[test]
fn test_search_json_output() {
    let (_tmp, config_path) = setup_config();
    let (stdout, stderr, success) = run_hirematch(&config_path, &["search", "java", "--json"]);
    assert!(success, "search failed: stderr={}", stderr);

    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["query"], "java");
    assert_eq!(body["mode"], "keyword");
    assert_eq!(
        body["total"].as_u64().unwrap() as usize,
        body["candidates"].as_array().unwrap().len()
    );
}

#[test]
fn test_search_rejects_blank_query() {
    let (_tmp, config_path) = setup_config();
    let (_, stderr, success) = run_hirematch(&config_path, &["search", "  "]);
    assert!(!success);
    assert!(stderr.contains("must not be empty"));
}

#[test]
fn test_candidates_lists_seed_pool() {
    let (_tmp, config_path) = setup_config();
    let (stdout, _, success) = run_hirematch(&config_path, &["candidates"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.contains("Sneha Reddy | Java Developer | Chennai"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("bad.toml");
    fs::write(&config_path, "[retrieval]\nfinal_limit = 0\n").unwrap();

    let (_, stderr, success) = run_hirematch(&config_path, &["candidates"]);
    assert!(!success);
    assert!(stderr.contains("final_limit"));
}
