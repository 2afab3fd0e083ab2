pub mod commits;
pub mod git_practices;
pub mod readme;
pub mod structure;
pub mod testing;

use crate::types::metadata::RepositoryMetadata;
use crate::types::scoring::{
    Badge, Rating, ScoreBreakdownItem, ScoreReport, CATEGORY_CODE_QUALITY, CATEGORY_CONSISTENCY,
    CATEGORY_DOCUMENTATION, CATEGORY_GIT_PRACTICES, CATEGORY_MAINTAINABILITY, CATEGORY_RELEVANCE,
    CATEGORY_STRUCTURE, MAX_CODE_QUALITY, MAX_CONSISTENCY, MAX_DOCUMENTATION, MAX_GIT_PRACTICES,
    MAX_MAINTAINABILITY, MAX_RELEVANCE, MAX_STRUCTURE,
};
use chrono::{DateTime, Utc};
use commits::{CommitReport, Consistency};
use git_practices::GitPracticesReport;
use readme::ReadmeReport;
use serde::Serialize;
use structure::StructureReport;

/// Combined output of the five analyzers. Recomputed from scratch per call;
/// the analyzers are pure and order-independent.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub structure: StructureReport,
    pub readme: ReadmeReport,
    pub has_tests: bool,
    pub commits: CommitReport,
    pub git_practices: GitPracticesReport,
}

pub fn analyze_metadata(meta: &RepositoryMetadata, now: DateTime<Utc>) -> Analysis {
    Analysis {
        structure: structure::analyze_structure(&meta.contents),
        readme: readme::analyze_readme(meta.readme.as_ref()),
        has_tests: testing::detect_tests(&meta.contents),
        commits: commits::analyze_commits(&meta.commits, now),
        git_practices: git_practices::analyze_git_practices(&meta.branches, &meta.pull_requests),
    }
}

/// Combine analyzer outputs and raw repository attributes into the seven
/// weighted category scores and the clamped total.
///
/// Organization and documentation are explicitly capped with `min`; code
/// quality (8+5+7), maintainability (10+3+2), and relevance (5+3+2) are
/// bounded by construction and left unclamped.
pub fn compute_score(meta: &RepositoryMetadata, analysis: &Analysis) -> ScoreReport {
    let repo = &meta.repo;

    let has_topics = !repo.topics.is_empty();
    let language_count = meta.languages.len();
    let test_score = if analysis.has_tests { 8.0 } else { 0.0 };
    let code_quality = test_score
        + if has_topics { 5.0 } else { 0.0 }
        + f64::min(7.0, language_count as f64 * 2.0);

    let organization = f64::min(15.0, f64::from(analysis.structure.score) * 1.5);

    let has_description = repo
        .description
        .as_deref()
        .is_some_and(|text| text.chars().count() > 20);
    let documentation = f64::min(
        20.0,
        f64::from(analysis.readme.score) * 1.5
            + if has_description { 3.0 } else { 0.0 }
            + if repo.license.is_some() { 2.0 } else { 0.0 },
    );

    let maintainability = if analysis.has_tests { 10.0 } else { 0.0 }
        + if repo.has_issues { 3.0 } else { 0.0 }
        + f64::min(2.0, meta.contributors.len() as f64 * 0.5);

    let relevance = f64::min(5.0, repo.stargazers_count as f64 / 50.0 * 5.0)
        + f64::min(3.0, repo.forks_count as f64 / 20.0 * 3.0)
        + if repo.has_homepage() { 2.0 } else { 0.0 };

    let consistency = match analysis.commits.consistency {
        Consistency::High => 10.0,
        Consistency::Medium => 6.0,
        Consistency::Low => 3.0,
        Consistency::None => 0.0,
    };

    let git_practices = f64::from(analysis.git_practices.score);

    let sum = code_quality
        + organization
        + documentation
        + maintainability
        + relevance
        + consistency
        + git_practices;
    let total_score = sum.min(100.0).round() as u32;

    ScoreReport {
        total_score,
        rating: Rating::from_total(total_score),
        badge: Badge::from_total(total_score),
        breakdown: vec![
            ScoreBreakdownItem::new(
                CATEGORY_CODE_QUALITY,
                code_quality.round() as u32,
                MAX_CODE_QUALITY,
            ),
            ScoreBreakdownItem::new(
                CATEGORY_STRUCTURE,
                organization.round() as u32,
                MAX_STRUCTURE,
            ),
            ScoreBreakdownItem::new(
                CATEGORY_DOCUMENTATION,
                documentation.round() as u32,
                MAX_DOCUMENTATION,
            ),
            ScoreBreakdownItem::new(
                CATEGORY_MAINTAINABILITY,
                maintainability.round() as u32,
                MAX_MAINTAINABILITY,
            ),
            ScoreBreakdownItem::new(
                CATEGORY_RELEVANCE,
                relevance.round() as u32,
                MAX_RELEVANCE,
            ),
            ScoreBreakdownItem::new(
                CATEGORY_CONSISTENCY,
                consistency.round() as u32,
                MAX_CONSISTENCY,
            ),
            ScoreBreakdownItem::new(
                CATEGORY_GIT_PRACTICES,
                git_practices.round() as u32,
                MAX_GIT_PRACTICES,
            ),
        ],
    }
}
