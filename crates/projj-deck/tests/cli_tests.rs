//! Tests for the projj-deck binary against a temporary home directory
//!
//! Only commands that read the projj files are exercised here; nothing
//! spawns projj or an external application.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn fake_home(cache: Option<&str>) -> TempDir {
    let home = TempDir::new().unwrap();
    let projj = home.path().join(".projj");
    fs::create_dir_all(&projj).unwrap();
    fs::write(
        projj.join("config.json"),
        r#"{"base": ["/code"], "alias": {}, "hooks": {}}"#,
    )
    .unwrap();
    if let Some(cache) = cache {
        fs::write(projj.join("cache.json"), cache).unwrap();
    }
    home
}

fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_projj-deck"))
        .arg("--home")
        .arg(home)
        .arg("--quiet")
        .args(args)
        .env_remove("PROJJ_DECK_HOME")
        .output()
        .expect("run projj-deck")
}

const KEYED_CACHE: &str = r#"{
    "version": "1",
    "/code/github.com/foo/bar": {"repo": "git@github.com:foo/bar.git"},
    "/code/github.com/foo/baz": {"repo": "https://github.com/foo/baz"}
}"#;

#[test]
fn test_list_json_newest_first() {
    let home = fake_home(Some(KEYED_CACHE));
    let output = run(home.path(), &["list", "--json"]);
    assert!(output.status.success());

    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "baz");
    assert_eq!(entries[1]["name"], "bar");
    assert_eq!(entries[1]["owner"], "foo");
    assert_eq!(entries[1]["location"], "/code/github.com/foo/bar");
}

#[test]
fn test_list_json_oldest_first() {
    let home = fake_home(Some(KEYED_CACHE));
    let output = run(home.path(), &["list", "--json", "--oldest-first"]);

    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries[0]["name"], "bar");
}

#[test]
fn test_list_json_without_cache_fails() {
    let home = fake_home(None);
    let output = run(home.path(), &["list", "--json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load the projj cache"));
}

#[test]
fn test_list_json_malformed_cache_fails() {
    let home = fake_home(Some("{ not json"));
    let output = run(home.path(), &["list", "--json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_list_json_empty_cache() {
    let home = fake_home(Some("{}"));
    let output = run(home.path(), &["list", "--json"]);
    assert!(output.status.success());

    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries, Value::Array(Vec::new()));
}

#[test]
fn test_list_empty_cache() {
    let home = fake_home(Some("{}"));
    let output = run(home.path(), &["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No projects yet"));
}

#[test]
fn test_path_and_url() {
    let home = fake_home(Some(KEYED_CACHE));

    let output = run(home.path(), &["path", "bar"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "/code/github.com/foo/bar"
    );

    let output = run(home.path(), &["url", "baz"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "https://github.com/foo/baz"
    );
}

#[test]
fn test_unknown_project_fails() {
    let home = fake_home(Some(KEYED_CACHE));
    let output = run(home.path(), &["path", "missing"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No project named 'missing'"));
}
