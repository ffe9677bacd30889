use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn scheme_desk_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("scheme-desk");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    fs::write(
        config_dir.join("schemes.toml"),
        r#"[[schemes]]
keyword = "ayushman bharat"
name = "Ayushman Bharat PM-JAY"
description = "Health cover of up to 5 lakh rupees per family per year."
eligibility = "Families listed in SECC 2011."
link = "https://pmjay.gov.in/"

[[schemes]]
keyword = "mudra"
name = "Pradhan Mantri MUDRA Yojana"
description = "Collateral-free loans for micro enterprises."
eligibility = "Non-farm small and micro businesses."
link = "https://www.mudra.org.in/"
"#,
    )
    .unwrap();

    let config_path = config_dir.join("scheme-desk.toml");
    fs::write(
        &config_path,
        r#"[server]
bind = "127.0.0.1:8000"

[catalog]
path = "schemes.toml"
"#,
    )
    .unwrap();

    (tmp, config_path)
}

fn run(args: &[&str], cwd: &Path) -> (String, String, bool) {
    let binary = scheme_desk_binary();
    let output = Command::new(&binary)
        .current_dir(cwd)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run scheme-desk binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_with_config(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let mut full = vec!["--config", config_path.to_str().unwrap()];
    full.extend_from_slice(args);
    run(&full, config_path.parent().unwrap())
}

#[test]
fn test_query_builtin_catalog_without_config_file() {
    // Default config path does not exist in an empty directory.
    let tmp = TempDir::new().unwrap();
    let (stdout, stderr, success) = run(
        &["query", "I want info on Pradhan Mantri Kisan Samman Nidhi scheme"],
        tmp.path(),
    );
    assert!(success, "query failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("1. Pradhan Mantri Kisan Samman Nidhi (PM-KISAN)"));
    assert!(stdout.contains("link: https://pmkisan.gov.in/"));
}

#[test]
fn test_query_no_match() {
    let tmp = TempDir::new().unwrap();
    let (stdout, _, success) = run(&["query", "random unrelated query"], tmp.path());
    assert!(success);
    assert!(stdout.contains("No schemes found."));
}

#[test]
fn test_query_json_output() {
    let tmp = TempDir::new().unwrap();
    let (stdout, stderr, success) = run(
        &["query", "  PRADHAN MANTRI JAN DHAN YOJANA  ", "--json", "--language", "hi"],
        tmp.path(),
    );
    assert!(success, "query failed: stderr={}", stderr);

    let results: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout));
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Pradhan Mantri Jan Dhan Yojana (PMJDY)");
    assert_eq!(results[0]["link"], "https://www.pmjdy.gov.in/");
}

#[test]
fn test_query_uses_configured_catalog() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_with_config(&config_path, &["query", "Need a MUDRA loan for my shop"]);
    assert!(success, "query failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Pradhan Mantri MUDRA Yojana"));
    assert!(!stdout.contains("PM-KISAN"));
}

#[test]
fn test_schemes_lists_in_order() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_with_config(&config_path, &["schemes"]);
    assert!(success, "schemes failed: stderr={}", stderr);

    let ayushman = stdout.find("ayushman bharat").expect("ayushman listed");
    let mudra = stdout.find("mudra").expect("mudra listed");
    assert!(ayushman < mudra, "Catalog order not preserved: {}", stdout);
    assert!(stdout.contains("https://pmjay.gov.in/"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.toml");
    let (_, stderr, success) = run_with_config(&missing, &["schemes"]);
    assert!(!success);
    assert!(
        stderr.contains("Failed to read config file"),
        "Expected config error, got: {}",
        stderr
    );
}

#[test]
fn test_explicit_default_config_path_must_exist() {
    // Same path the CLI falls back to, but given explicitly.
    let tmp = TempDir::new().unwrap();
    let (stdout, stderr, success) = run(
        &["--config", "./config/scheme-desk.toml", "query", "beti bachao beti padhao"],
        tmp.path(),
    );
    assert!(!success, "Expected failure, got stdout: {}", stdout);
    assert!(
        stderr.contains("Failed to read config file"),
        "Expected config error, got: {}",
        stderr
    );
}

#[test]
fn test_duplicate_keyword_catalog_rejected() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        tmp.path().join("config").join("schemes.toml"),
        r#"[[schemes]]
keyword = "mudra"
name = "A"
link = "https://a.gov.in/"

[[schemes]]
keyword = "MUDRA"
name = "B"
link = "https://b.gov.in/"
"#,
    )
    .unwrap();

    let (_, stderr, success) = run_with_config(&config_path, &["schemes"]);
    assert!(!success);
    assert!(
        stderr.contains("duplicate keyword"),
        "Expected duplicate keyword error, got: {}",
        stderr
    );
}
