//! Tests for the research-panel binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PAPER: &str = "Sparse Attention at Scale\n\
    Written by Edsger Dijkstra\n\
    In 2022 we study sparse attention. The benchmark: LRA is used throughout. \
    We report precision: 0.77 and recall: 0.74 for the main model. \
    Training is stable and converges quickly.";

fn panel() -> Command {
    let mut cmd = Command::cargo_bin("research-panel").unwrap();
    for key in [
        "PANEL_AGENTS",
        "PANEL_ROUNDS",
        "PANEL_CITATION_STRICTNESS",
        "PANEL_SEED",
        "PANEL_EXECUTION",
        "PANEL_ROUND_DEADLINE_MS",
        "PANEL_CHUNK_SIZE",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

fn write_paper(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, PAPER).unwrap();
    path
}

#[test]
fn test_agents_lists_all_roles() {
    panel()
        .arg("agents")
        .assert()
        .success()
        .stdout(predicate::str::contains("Researcher"))
        .stdout(predicate::str::contains("CitationGuard"))
        .stdout(predicate::str::contains("enabled by default"));
}

#[test]
fn test_chunk_prints_chunks() {
    let dir = TempDir::new().unwrap();
    let path = write_paper(&dir, "paper.txt");

    panel()
        .args(["chunk", path.to_str().unwrap(), "--chunk-size", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- chunk 0 (start 0) ---"))
        .stdout(predicate::str::contains("--- chunk 1"));
}

#[test]
fn test_inspect_json() {
    let dir = TempDir::new().unwrap();
    let path = write_paper(&dir, "paper.txt");

    let output = panel()
        .args(["--format", "json", "inspect", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let meta = &json["documents"][0]["metadata"];
    assert_eq!(json["documents"][0]["id"], "doc_0");
    assert_eq!(meta["title"], "Sparse Attention at Scale");
    assert_eq!(meta["authors"], "Edsger Dijkstra");
    assert_eq!(meta["year"], "2022");
    assert_eq!(meta["metrics"], "precision: 0.77; recall: 0.74");
}

#[test]
fn test_run_prints_markdown_report() {
    let dir = TempDir::new().unwrap();
    let path = write_paper(&dir, "paper.txt");

    panel()
        .args(["run", path.to_str().unwrap(), "--rounds", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "# Multi-Agent Research Analysis Report",
        ))
        .stdout(predicate::str::contains("## Evidence Summary"))
        .stdout(predicate::str::contains("### claim_3"));
}

#[test]
fn test_run_json_with_graph() {
    let dir = TempDir::new().unwrap();
    let path = write_paper(&dir, "paper.txt");

    let output = panel()
        .args([
            "--format",
            "json",
            "run",
            path.to_str().unwrap(),
            "--agents",
            "researcher,citation-guard",
            "--rounds",
            "2",
            "--graph",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["metadata"]["num_messages"], 4);
    assert_eq!(json["graph"]["nodes"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["graph"]["edges"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["graph"]["nodes"][1]["id"], "CitationGuard_r1");
}

#[test]
fn test_run_reads_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_paper(&dir, "paper.txt");

    let output = panel()
        .env("PANEL_AGENTS", "reviewer")
        .env("PANEL_ROUNDS", "3")
        .args(["--format", "json", "run", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["metadata"]["num_messages"], 3);
    assert_eq!(json["report"]["metadata"]["num_agents"], 1);
}

#[test]
fn test_run_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let path = write_paper(&dir, "paper.txt");
    let out = dir.path().join("out/report.md");

    panel()
        .args([
            "run",
            path.to_str().unwrap(),
            "--rounds",
            "1",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let report = std::fs::read_to_string(out).unwrap();
    assert!(report.contains("## Key Hypotheses"));
}

#[test]
fn test_missing_file_fails() {
    panel()
        .args(["run", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_zero_rounds_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_paper(&dir, "paper.txt");

    panel()
        .args(["run", path.to_str().unwrap(), "--rounds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid panel configuration"));
}
