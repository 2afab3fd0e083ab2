//! Load and save repository metadata snapshots as JSON files, for offline
//! scoring and deterministic tests.

use crate::error::{GradeError, Result};
use crate::types::metadata::RepositoryMetadata;
use std::path::Path;

pub fn load_snapshot(path: &Path) -> Result<RepositoryMetadata> {
    if !path.exists() {
        return Err(GradeError::SnapshotNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_snapshot(path: &Path, meta: &RepositoryMetadata) -> Result<()> {
    let rendered = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metadata::RepoInfo;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn sample() -> RepositoryMetadata {
        RepositoryMetadata {
            repo: RepoInfo {
                full_name: "octocat/snap".to_string(),
                description: Some("snapshot sample".to_string()),
                homepage: None,
                license: None,
                topics: vec!["testing".to_string()],
                stargazers_count: 3,
                forks_count: 1,
                has_issues: true,
            },
            languages: BTreeMap::from([("Rust".to_string(), 1000)]),
            contents: vec![],
            readme: None,
            commits: vec![],
            branches: vec![],
            pull_requests: vec![],
            contributors: vec![],
            issues: vec![],
        }
    }

    #[test]
    fn snapshot_round_trips_through_disk() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("snapshot.json");
        write_snapshot(&path, &sample()).expect("write should succeed");
        let loaded = load_snapshot(&path).expect("load should succeed");
        assert_eq!(loaded.repo.full_name, "octocat/snap");
        assert_eq!(loaded.languages.len(), 1);
    }

    #[test]
    fn missing_snapshot_is_a_distinct_error() {
        let err = load_snapshot(Path::new("/nonexistent/snapshot.json"))
            .expect_err("load should fail");
        assert!(matches!(err, GradeError::SnapshotNotFound(_)));
    }

    #[test]
    fn malformed_snapshot_surfaces_json_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{not json").expect("write should succeed");
        let err = load_snapshot(&path).expect_err("load should fail");
        assert!(matches!(err, GradeError::Json(_)));
    }
}
