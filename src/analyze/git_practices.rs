use crate::types::metadata::{Branch, PullRequest};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct GitPracticesReport {
    pub score: u32,
    pub branch_count: usize,
    pub pr_count: usize,
    pub merged_prs: usize,
    pub uses_feature_branches: bool,
    pub uses_prs: bool,
    pub good_merge_rate: bool,
}

/// Derive the collaboration-practices sub-score from branch and PR lists.
pub fn analyze_git_practices(branches: &[Branch], pull_requests: &[PullRequest]) -> GitPracticesReport {
    let branch_count = branches.len();
    let pr_count = pull_requests.len();
    let merged_prs = pull_requests
        .iter()
        .filter(|pr| pr.merged_at.is_some())
        .count();

    let uses_feature_branches = branch_count > 1;
    let uses_prs = pr_count > 0;
    let good_merge_rate = pr_count > 0 && merged_prs as f64 / pr_count as f64 > 0.5;

    let score = u32::from(uses_feature_branches) * 3
        + u32::from(uses_prs) * 4
        + u32::from(good_merge_rate) * 3;

    GitPracticesReport {
        score,
        branch_count,
        pr_count,
        merged_prs,
        uses_feature_branches,
        uses_prs,
        good_merge_rate,
    }
}
