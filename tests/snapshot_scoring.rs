// End-to-end scoring over a saved metadata snapshot, exercising the full
// pipeline (analyzers, aggregation, rendering, narrative fallback) without
// network access.

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn readme_base64() -> String {
    let text = "# Sample Project\n\n\
        A longer description paragraph that easily exceeds one hundred characters \
        for scoring purposes, covering project goals in detail.\n\n\
        ## Installation\n\n```sh\ncargo install sample\n```\n\n\
        ## Usage\n\n![demo](demo.png)\n\n\
        See CONTRIBUTING.md. Licensed under the MIT License.\n";
    STANDARD.encode(text.as_bytes())
}

/// Snapshot of a mid-quality repository: full README, tests, two branches,
/// a 50% PR merge rate, and stale commit history.
fn write_snapshot(dir: &Path) -> PathBuf {
    let snapshot = serde_json::json!({
        "repo": {
            "full_name": "octocat/sample",
            "description": "A sample repository used for scoring tests",
            "homepage": "https://example.com",
            "license": { "name": "MIT License", "spdx_id": "MIT" },
            "topics": ["demo"],
            "stargazers_count": 100,
            "forks_count": 10,
            "has_issues": true
        },
        "languages": { "Rust": 1000 },
        "contents": [
            { "name": "src", "type": "dir" },
            { "name": "tests", "type": "dir" },
            { "name": "app.test.js", "type": "file" },
            { "name": ".gitignore", "type": "file" }
        ],
        "readme": { "content": readme_base64(), "encoding": "base64" },
        "commits": [
            { "commit": { "message": "introduce the scoring pipeline end to end",
                          "author": { "date": "2020-05-01T10:00:00Z" } } },
            { "commit": { "message": "document installation and usage flows",
                          "author": { "date": "2020-04-20T10:00:00Z" } } },
            { "commit": { "message": "fix", "author": { "date": "2020-04-10T10:00:00Z" } } }
        ],
        "branches": [ { "name": "main" }, { "name": "dev" } ],
        "pull_requests": [
            { "merged_at": "2020-05-02T00:00:00Z" },
            { "merged_at": null }
        ],
        "contributors": [ { "login": "octocat", "contributions": 42 } ],
        "issues": []
    });
    let path = dir.join("snapshot.json");
    fs::write(&path, serde_json::to_string_pretty(&snapshot).expect("snapshot should serialize"))
        .expect("snapshot should write");
    path
}

/// Command wired to an isolated HOME and cwd so no real config or API key
/// leaks into the run.
fn repograde_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("repograde").expect("binary should exist");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("GITHUB_TOKEN");
    cmd
}

// Expected category scores for the snapshot above:
//   code quality 8+5+2 = 15, organization 6*1.5 = 9, documentation 20 (capped),
//   maintainability 10+3+0.5 = 13.5 -> 14, relevance 5+1.5+2 = 8.5 -> 9,
//   consistency low = 3, git practices 3+4 = 7; total 76.

#[test]
fn score_from_snapshot_renders_markdown_report() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path());

    repograde_in(dir.path())
        .args(["score", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Repository Grade: octocat/sample"))
        .stdout(predicate::str::contains(
            "Total score: 76/100 (Intermediate, Silver badge)",
        ))
        .stdout(predicate::str::contains("- Documentation & Clarity: 20/20"))
        .stdout(predicate::str::contains("- Real-world Relevance: 9/10"))
        .stdout(predicate::str::contains("- Commit Consistency: 3/10"));
}

#[test]
fn score_from_snapshot_renders_json_report() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path());

    repograde_in(dir.path())
        .args(["score", "--format", "json", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_score\": 76"))
        .stdout(predicate::str::contains("\"rating\": \"Intermediate\""))
        .stdout(predicate::str::contains("\"badge\": \"Silver\""));
}

#[test]
fn fail_under_gate_exits_with_code_two() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path());

    repograde_in(dir.path())
        .args(["score", "--fail-under", "80", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("below the required threshold"));
}

#[test]
fn fail_under_gate_passes_at_threshold() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path());

    repograde_in(dir.path())
        .args(["score", "--fail-under", "76", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();
}

#[test]
fn summary_without_collaborator_uses_rule_based_fallback() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path());

    repograde_in(dir.path())
        .args(["summary", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Summary"))
        .stdout(predicate::str::contains(
            "Improve commit consistency (currently 3/10)",
        ))
        .stdout(predicate::str::contains("7 key dimensions"));
}

#[test]
fn roadmap_without_collaborator_uses_rule_based_fallback() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path());

    repograde_in(dir.path())
        .args(["roadmap", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Roadmap"))
        // README, structure, and license are all fine, so no critical phase.
        .stdout(predicate::str::contains("### Professional Polish (Week 7-8+)").and(
            predicate::str::contains("Critical Foundation").not(),
        ))
        .stdout(predicate::str::contains("[high] Add CI/CD Pipeline"));
}

#[test]
fn disabled_collaborator_config_is_respected() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path());
    fs::write(
        dir.path().join("repograde.toml"),
        "[narrative]\napi_key = \"sk-unused\"\ndisabled = true\n",
    )
    .expect("config should write");

    repograde_in(dir.path())
        .args(["summary", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 key dimensions"));
}
