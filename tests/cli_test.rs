//! CLI contract tests
//!
//! Runs the built binary against fixture graphs in temp directories and
//! checks exit codes and machine-readable output.

use std::path::{Path, PathBuf};
use std::process::Command;

fn attackchain_bin() -> &'static str {
    env!("CARGO_BIN_EXE_attackchain")
}

/// Run the binary in `dir` so no stray attackchain.toml is picked up
fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(attackchain_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("ATTACKCHAIN_CONFIG")
        .output()
        .expect("Failed to run attackchain");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Write the built-in sample graph into `dir`
fn write_sample(dir: &Path, file: &str) -> PathBuf {
    let format = if file.ends_with(".toml") { "toml" } else { "json" };
    let (code, stdout, _) = run(dir, &["sample", "--format", format]);
    assert_eq!(code, 0);
    let path = dir.join(file);
    std::fs::write(&path, stdout).unwrap();
    path
}

const DISCONNECTED: &str = r#"{
    "nodes": [
        {"id": "in", "category": "entry", "severity": "high", "cvss": 7.0},
        {"id": "out", "category": "exfiltration", "severity": "high", "cvss": 7.0}
    ],
    "edges": []
}"#;

// ============================================================================
// analyze
// ============================================================================

#[test]
fn test_analyze_json_fields() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, stdout, _) = run(dir.path(), &["analyze", "graph.json", "-f", "json"]);
    assert_eq!(code, 0);
    let chain: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");

    assert_eq!(chain["name"], "Attack Chain");
    assert_eq!(chain["status"], "completed");
    assert!(chain["id"].as_str().unwrap().starts_with("chain-"));
    assert_eq!(chain["summary"]["total_steps"], 6);
    assert_eq!(chain["summary"]["critical_vulns"], 3);
    assert_eq!(chain["summary"]["estimated_time"], "4-8h");
    let success = chain["summary"]["success_probability"].as_f64().unwrap();
    assert!((success - 43.605).abs() < 1e-6);
    assert_eq!(chain["nodes"].as_array().unwrap().len(), 6);
    assert_eq!(chain["edges"].as_array().unwrap().len(), 5);
}

#[test]
fn test_analyze_toml_fixture_and_name() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.toml");

    let (code, stdout, _) = run(
        dir.path(),
        &["analyze", "graph.toml", "--name", "Prod", "-f", "json", "--compact"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim().lines().count(), 1);
    let chain: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(chain["name"], "Prod");
}

#[test]
fn test_analyze_between_nodes() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, stdout, _) = run(
        dir.path(),
        &["analyze", "graph.json", "--from", "3", "--to", "5", "-f", "json"],
    );
    assert_eq!(code, 0);
    let chain: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(chain["summary"]["most_likely_path"], serde_json::json!(["3", "4", "5"]));
}

#[test]
fn test_analyze_all_is_array() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, stdout, _) = run(dir.path(), &["analyze", "graph.json", "--all", "-f", "json"]);
    assert_eq!(code, 0);
    let chains: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    let chains = chains.as_array().unwrap();
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0]["name"], "Attack Chain (1 -> 6)");
}

#[test]
fn test_no_result_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("graph.json"), DISCONNECTED).unwrap();

    let (code, stdout, stderr) = run(dir.path(), &["analyze", "graph.json", "-f", "json"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().is_empty());
    assert!(stderr.contains("No attack chain found"));
}

#[test]
fn test_fail_on_empty_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("graph.json"), DISCONNECTED).unwrap();

    let (code, _, _) = run(dir.path(), &["analyze", "graph.json", "--fail-on-empty"]);
    assert_eq!(code, 2);
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, _, _) = run(
        dir.path(),
        &["analyze", "graph.json", "-f", "markdown", "-o", "chain.md"],
    );
    assert_eq!(code, 0);
    let md = std::fs::read_to_string(dir.path().join("chain.md")).unwrap();
    assert!(md.contains("## Attack Steps"));
    assert!(md.contains("`T1190`"));
}

#[test]
fn test_text_output_file_is_plain() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, _, _) = run(dir.path(), &["analyze", "graph.json", "-o", "report"]);
    assert_eq!(code, 0);
    let text = std::fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(text.contains("Initial Access (SQL Injection)"));
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_compact_with_all_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, stdout, _) = run(
        dir.path(),
        &["analyze", "graph.json", "--all", "-f", "json", "--compact"],
    );
    assert_ne!(code, 0);
    assert!(stdout.trim().is_empty());
}

#[test]
fn test_invalid_graph_rejected_unless_lenient() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("graph.json"),
        r#"{
            "nodes": [
                {"id": "a", "category": "entry", "severity": "high", "cvss": 7.0},
                {"id": "b", "category": "exfiltration", "severity": "high", "cvss": 7.0}
            ],
            "edges": [
                {"id": "e1", "from": "a", "to": "b", "probability": 0.5},
                {"id": "e2", "from": "a", "to": "ghost", "probability": 0.5}
            ]
        }"#,
    )
    .unwrap();

    let (code, _, stderr) = run(dir.path(), &["analyze", "graph.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown node 'ghost'"));

    let (code, stdout, _) = run(dir.path(), &["analyze", "graph.json", "--lenient", "-f", "json"]);
    assert_eq!(code, 0);
    let chain: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(chain["summary"]["most_likely_path"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_config_max_nodes() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");
    std::fs::write(dir.path().join("attackchain.toml"), "[analysis]\nmax_nodes = 3\n").unwrap();

    let (code, _, stderr) = run(dir.path(), &["analyze", "graph.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("limit is 3"));
}

#[test]
fn test_explicit_config_must_parse() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");
    std::fs::write(dir.path().join("broken.toml"), "[scoring\n").unwrap();

    let (code, _, _) = run(dir.path(), &["analyze", "graph.json", "--config", "broken.toml"]);
    assert_ne!(code, 0);
}

// ============================================================================
// paths / validate / init
// ============================================================================

#[test]
fn test_paths_json() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, stdout, _) = run(
        dir.path(),
        &["paths", "graph.json", "--from", "1", "--to", "6", "-f", "json"],
    );
    assert_eq!(code, 0);
    let paths: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    let paths = paths.as_array().unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0]["path"].as_array().unwrap().len(), 6);

    let (code, _, _) = run(dir.path(), &["paths", "graph.json", "--from", "1", "--to", "nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_validate() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "graph.json");

    let (code, stdout, _) = run(dir.path(), &["validate", "graph.json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Graph is valid"));
    assert!(stdout.contains("privilege-escalation"));

    std::fs::write(
        dir.path().join("bad.json"),
        r#"{"nodes": [{"id": "a", "category": "entry", "cvss": 12.0}], "edges": []}"#,
    )
    .unwrap();
    let (code, stdout, _) = run(dir.path(), &["validate", "bad.json"]);
    assert_ne!(code, 0);
    assert!(stdout.contains("cvss 12"));
}

#[test]
fn test_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    let config = std::fs::read_to_string(dir.path().join("attackchain.toml")).unwrap();
    assert!(config.contains("[scoring]"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["version"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("attackchain "));
}
