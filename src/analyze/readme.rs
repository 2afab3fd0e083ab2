use crate::types::metadata::ReadmeBlob;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReadmeReport {
    pub score: u32,
    pub length: usize,
    pub has_sections: bool,
    pub has_title: bool,
    pub has_description: bool,
    pub has_installation: bool,
    pub has_usage: bool,
    pub has_contributing: bool,
    pub has_license: bool,
    pub has_images: bool,
    pub has_code_blocks: bool,
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("readme pattern must compile"))
}

fn title_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, r"(?m)^#+\s")
}

fn installation_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, r"(?i)install|setup|getting started")
}

fn usage_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, r"(?i)usage|example|how to")
}

fn contributing_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, r"(?i)contribut")
}

fn license_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, r"(?i)license")
}

fn image_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    pattern(&CELL, r"!\[.*\]\(.*\)")
}

/// Decode a GitHub README blob. The API wraps the base64 payload with
/// newlines, and the decoded bytes are UTF-8 that may contain multi-byte
/// sequences; decode byte-wise and convert lossily rather than failing.
pub fn decode_readme(blob: &ReadmeBlob) -> String {
    let compact: String = blob
        .content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}

/// Derive the documentation sub-score and feature flags from the decoded
/// README. Absent README yields the zero report.
pub fn analyze_readme(readme: Option<&ReadmeBlob>) -> ReadmeReport {
    let Some(blob) = readme else {
        return ReadmeReport::default();
    };
    let content = decode_readme(blob);
    if content.is_empty() {
        return ReadmeReport::default();
    }
    let length = content.chars().count();

    let has_title = title_pattern().is_match(&content);
    let has_description = length > 100;
    let has_installation = installation_pattern().is_match(&content);
    let has_usage = usage_pattern().is_match(&content);
    let has_contributing = contributing_pattern().is_match(&content);
    let has_license = license_pattern().is_match(&content);
    let has_images = image_pattern().is_match(&content);
    let has_code_blocks = content.contains("```");

    // Declarative weight table: flag -> points.
    let weighted: [(bool, u32); 8] = [
        (has_title, 1),
        (has_description, 2),
        (has_installation, 2),
        (has_usage, 2),
        (has_contributing, 1),
        (has_license, 1),
        (has_images, 1),
        (has_code_blocks, 1),
    ];
    let score = weighted
        .iter()
        .filter(|(flag, _)| *flag)
        .map(|(_, weight)| weight)
        .sum();

    ReadmeReport {
        score,
        length,
        has_sections: has_installation && has_usage,
        has_title,
        has_description,
        has_installation,
        has_usage,
        has_contributing,
        has_license,
        has_images,
        has_code_blocks,
    }
}
