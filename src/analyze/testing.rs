use crate::types::metadata::DirEntry;
use regex::RegexSet;
use std::sync::OnceLock;

/// Test-file naming conventions across common ecosystems: prefix/suffix
/// `test`/`spec` with their usual extensions, plus the `__tests__` and
/// `spec/` markers.
const TEST_NAME_PATTERNS: [&str; 11] = [
    r"test.*\.js$",
    r".*\.test\.js$",
    r".*\.spec\.js$",
    r"test.*\.py$",
    r".*_test\.py$",
    r".*\.test\.py$",
    r"test.*\.ts$",
    r".*\.test\.ts$",
    r".*\.spec\.ts$",
    r"__tests__",
    r"spec/",
];

fn test_name_set() -> &'static RegexSet {
    static CELL: OnceLock<RegexSet> = OnceLock::new();
    CELL.get_or_init(|| RegexSet::new(TEST_NAME_PATTERNS).expect("test patterns must compile"))
}

/// True if any entry name matches a known test-file convention. Empty
/// listings yield false.
pub fn detect_tests(contents: &[DirEntry]) -> bool {
    contents
        .iter()
        .any(|entry| test_name_set().is_match(&entry.name))
}
