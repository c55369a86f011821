//! Integration tests for the CLI subcommands.
//!
//! These tests use `assert_cmd` against the shared fixture dataset to verify
//! JSON output, text output, sitemap generation and exit codes.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Path to the test fixture dataset.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/labs.json")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("labfinder-cli").expect("binary exists");
    cmd.env_remove("LABFINDER_DATA_PATH")
        .env_remove("SITE_BASE_URL")
        .env("NO_COLOR", "1");
    cmd
}

fn search_json(args: &[&str]) -> Value {
    let output = cli()
        .arg("--data-path")
        .arg(fixture_path())
        .arg("search")
        .args(args)
        .output()
        .expect("command runs");
    assert!(output.status.success(), "search failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn names(result: &Value) -> Vec<String> {
    result["labs"]
        .as_array()
        .expect("labs array")
        .iter()
        .map(|lab| lab["labName"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_search_returns_all_labs_by_default() {
    let result = search_json(&[]);

    assert_eq!(result["totalCount"], 8);
    assert_eq!(result["currentPage"], 1);
    assert_eq!(result["totalPages"], 1);
    assert_eq!(names(&result)[0], "Alpha Labs");
    assert_eq!(result["labs"][0]["state"], "Gujarat");
}

#[test]
fn test_search_state_filter() {
    let result = search_json(&["--state", "Gujarat"]);

    assert_eq!(result["totalCount"], 2);
    assert_eq!(
        names(&result),
        ["Alpha Labs", "gujarat pollution testing centre"]
    );
}

#[test]
fn test_search_repeated_discipline() {
    let result = search_json(&["-d", "Forensic", "-d", "Electrical"]);
    assert_eq!(
        names(&result),
        ["Beta Testing", "Mumbai Forensic Sciences"]
    );
}

#[test]
fn test_search_active_as_of_date() {
    let before = search_json(&["--certificate-status", "active", "--as-of", "2024-06-01"]);
    let after = search_json(&["--certificate-status", "active", "--as-of", "2025-01-01"]);

    assert_eq!(before["totalCount"], 5);
    assert_eq!(after["totalCount"], 4);
    assert!(names(&before).contains(&"Zenith Software Assurance".to_string()));
    assert!(!names(&after).contains(&"Zenith Software Assurance".to_string()));
}

#[test]
fn test_search_paging() {
    let result = search_json(&["--limit", "3", "--page", "3"]);

    assert_eq!(result["totalPages"], 3);
    assert_eq!(result["labs"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_search_unknown_sort_falls_back_to_name() {
    let by_name = search_json(&[]);
    let unknown = search_json(&["--sort-by", "popularity"]);
    assert_eq!(names(&by_name), names(&unknown));
}

#[test]
fn test_search_rejects_malformed_as_of() {
    cli()
        .arg("--data-path")
        .arg(fixture_path())
        .args(["search", "--as-of", "31-12-2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_search_text_format() {
    cli()
        .arg("--data-path")
        .arg(fixture_path())
        .args(["--format", "text", "search", "--query", "forensic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 labs found (page 1 of 1)"))
        .stdout(predicate::str::contains("Mumbai Forensic Sciences (#7)"))
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn test_data_path_from_environment() {
    let output = cli()
        .env("LABFINDER_DATA_PATH", fixture_path())
        .arg("facets")
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let facets: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(facets["states"].as_array().map(Vec::len), Some(6));
    assert_eq!(facets["states"][0], "Gujarat");
}

#[test]
fn test_missing_dataset_fails() {
    let temp_dir = TempDir::new().expect("create temp dir");

    cli()
        .arg("--data-path")
        .arg(temp_dir.path().join("labs.json"))
        .arg("facets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load dataset"));
}

#[test]
fn test_malformed_dataset_fails() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("labs.json");
    fs::write(&path, "{ not json").expect("write dataset");

    cli()
        .arg("--data-path")
        .arg(&path)
        .args(["search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load dataset"));
}

#[test]
fn test_sitemap_to_stdout() {
    cli()
        .args([
            "sitemap",
            "--base-url",
            "https://labs.example.com/",
            "--lastmod",
            "2025-03-09",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<loc>https://labs.example.com/</loc>"))
        .stdout(predicate::str::contains("<loc>https://labs.example.com/lab-directory</loc>"))
        .stdout(predicate::str::contains("<lastmod>2025-03-09</lastmod>"))
        .stdout(predicate::str::contains("com//").not());
}

#[test]
fn test_sitemap_to_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("public").join("sitemap.xml");

    cli()
        .args(["sitemap", "--base-url", "https://labs.example.com", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sitemap with 8 URLs written"));

    let xml = fs::read_to_string(&path).expect("sitemap written");
    assert_eq!(xml.matches("<url>").count(), 8);
    assert!(xml.contains("<changefreq>daily</changefreq>"));
}

#[test]
fn test_sitemap_requires_http_base_url() {
    cli()
        .args(["sitemap", "--base-url", "labs.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base-url must start with http"));
}
