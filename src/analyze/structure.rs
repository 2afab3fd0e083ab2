use crate::types::metadata::{DirEntry, EntryKind};
use serde::Serialize;

const SOURCE_DIRS: [&str; 4] = ["src", "source", "app", "lib"];
const TEST_DIRS: [&str; 4] = ["test", "tests", "__tests__", "spec"];
const DOC_DIRS: [&str; 2] = ["docs", "documentation"];
const CONFIG_FILES: [&str; 4] = [
    ".gitignore",
    ".editorconfig",
    "package.json",
    "requirements.txt",
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct StructureReport {
    pub score: u32,
    pub file_count: usize,
    pub folder_count: usize,
    pub organized: bool,
    pub has_source: bool,
    pub has_tests: bool,
    pub has_docs: bool,
    pub has_config: bool,
}

/// Derive the organization sub-score from the top-level directory listing.
/// Name matching is case-insensitive; an empty listing yields the zero
/// report.
pub fn analyze_structure(contents: &[DirEntry]) -> StructureReport {
    if contents.is_empty() {
        return StructureReport::default();
    }

    let file_count = contents
        .iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .count();
    let folder_count = contents
        .iter()
        .filter(|entry| entry.kind == EntryKind::Dir)
        .count();

    let dir_named = |names: &[&str]| {
        contents.iter().any(|entry| {
            entry.kind == EntryKind::Dir && names.contains(&entry.name.to_lowercase().as_str())
        })
    };
    let file_named = |names: &[&str]| {
        contents.iter().any(|entry| {
            entry.kind == EntryKind::File && names.contains(&entry.name.to_lowercase().as_str())
        })
    };

    let has_source = dir_named(&SOURCE_DIRS);
    let has_tests = dir_named(&TEST_DIRS);
    let has_docs = dir_named(&DOC_DIRS);
    let has_config = file_named(&CONFIG_FILES);

    let organized = has_source || (folder_count > 0 && file_count < 10);
    let score = u32::from(has_source) * 3
        + u32::from(has_tests) * 2
        + u32::from(has_docs) * 2
        + u32::from(has_config);

    StructureReport {
        score,
        file_count,
        folder_count,
        organized,
        has_source,
        has_tests,
        has_docs,
        has_config,
    }
}
