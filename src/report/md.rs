use crate::report::GradeReport;

pub fn to_markdown(report: &GradeReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Repository Grade: {}\n\n", report.repository));
    output.push_str(&format!(
        "Total score: {}/100 ({}, {} badge)\n\n",
        report.score.total_score, report.score.rating, report.score.badge
    ));

    output.push_str("## Score Breakdown\n\n");
    for item in &report.score.breakdown {
        output.push_str(&format!(
            "- {}: {}/{}\n",
            item.category, item.score, item.max_score
        ));
    }
    output.push('\n');

    output.push_str("## Repository Signals\n\n");
    output.push_str(&format!(
        "- files: {} | folders: {} | organized: {}\n",
        report.analysis.structure.file_count,
        report.analysis.structure.folder_count,
        report.analysis.structure.organized
    ));
    output.push_str(&format!(
        "- tests detected: {} | README score: {}/11\n",
        report.analysis.has_tests, report.analysis.readme.score
    ));
    output.push_str(&format!(
        "- commits: {} ({} recent, consistency {})\n",
        report.analysis.commits.total,
        report.analysis.commits.recent_count,
        report.analysis.commits.consistency
    ));
    output.push_str(&format!(
        "- branches: {} | pull requests: {} ({} merged)\n\n",
        report.analysis.git_practices.branch_count,
        report.analysis.git_practices.pr_count,
        report.analysis.git_practices.merged_prs
    ));

    if let Some(summary) = &report.summary {
        output.push_str("## Summary\n\n");
        output.push_str(&format!("{}\n\n", summary.analysis));
        output.push_str("### Strengths\n\n");
        for strength in &summary.strengths {
            output.push_str(&format!("- {strength}\n"));
        }
        output.push_str("\n### Improvements\n\n");
        for improvement in &summary.improvements {
            output.push_str(&format!("- {improvement}\n"));
        }
        output.push_str(&format!("\n_{}_\n\n", summary.methodology));
    }

    if let Some(roadmap) = &report.roadmap {
        output.push_str("## Roadmap\n\n");
        for phase in &roadmap.phases {
            output.push_str(&format!("### {} ({})\n\n", phase.name, phase.timeline));
            if phase.tasks.is_empty() {
                output.push_str("- nothing to do here\n");
            }
            for task in &phase.tasks {
                output.push_str(&format!(
                    "- [{}] {}: {}\n",
                    task.priority, task.title, task.description
                ));
            }
            output.push('\n');
        }
        output.push_str("### Expected Outcomes\n\n");
        for outcome in &roadmap.outcomes {
            output.push_str(&format!("- {outcome}\n"));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{analyze_metadata, compute_score};
    use crate::narrative::fallback;
    use crate::types::metadata::{RepoInfo, RepositoryMetadata};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn metadata() -> RepositoryMetadata {
        RepositoryMetadata {
            repo: RepoInfo {
                full_name: "octocat/md".to_string(),
                description: None,
                homepage: None,
                license: None,
                topics: vec![],
                stargazers_count: 0,
                forks_count: 0,
                has_issues: false,
            },
            languages: BTreeMap::new(),
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
    fn markdown_report_contains_sections() {
        let meta = metadata();
        let analysis = analyze_metadata(&meta, Utc::now());
        let score = compute_score(&meta, &analysis);
        let summary = fallback::rule_based_summary(&score);
        let roadmap = fallback::rule_based_roadmap(&meta, &analysis);
        let report = GradeReport {
            repository: meta.repo.full_name.clone(),
            score,
            analysis,
            summary: Some(summary),
            roadmap: Some(roadmap),
        };

        let rendered = to_markdown(&report);
        assert!(rendered.contains("# Repository Grade: octocat/md"));
        assert!(rendered.contains("## Score Breakdown"));
        assert!(rendered.contains("## Summary"));
        assert!(rendered.contains("### Professional Polish (Week 7-8+)"));
        assert!(rendered.contains("(Beginner, Bronze badge)"));
    }

    #[test]
    fn markdown_without_narratives_skips_those_sections() {
        let meta = metadata();
        let analysis = analyze_metadata(&meta, Utc::now());
        let score = compute_score(&meta, &analysis);
        let report = GradeReport {
            repository: meta.repo.full_name.clone(),
            score,
            analysis,
            summary: None,
            roadmap: None,
        };

        let rendered = to_markdown(&report);
        assert!(!rendered.contains("## Summary"));
        assert!(!rendered.contains("## Roadmap"));
        assert!(rendered.contains("## Repository Signals"));
    }
}
