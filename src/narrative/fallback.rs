//! Deterministic rule-based summary and roadmap generation.
//!
//! This is the path taken whenever the narrative collaborator is absent or
//! fails; it derives everything from the score breakdown and the analyzer
//! flags, so two runs over the same metadata produce identical output.

use crate::analyze::Analysis;
use crate::types::metadata::RepositoryMetadata;
use crate::types::narrative::{Priority, Roadmap, RoadmapPhase, Summary, Task};
use crate::types::scoring::ScoreReport;

const METHODOLOGY: &str = "This repository was evaluated across 7 key dimensions: \
Code Quality & Readability (20pts), Project Structure & Organization (15pts), \
Documentation & Clarity (20pts), Test Coverage & Maintainability (15pts), \
Real-world Relevance (10pts), Commit Consistency (10pts), and \
Version Control Practices (10pts).";

pub fn rule_based_summary(score: &ScoreReport) -> Summary {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    for item in &score.breakdown {
        let percentage = item.percentage();
        if percentage >= 70.0 {
            strengths.push(format!(
                "Strong {} with {}/{} points",
                item.category.to_lowercase(),
                item.score,
                item.max_score
            ));
        } else if percentage < 50.0 {
            improvements.push(format!(
                "Improve {} (currently {}/{})",
                item.category.to_lowercase(),
                item.score,
                item.max_score
            ));
        }
    }

    let total = score.total_score;
    let analysis = if total >= 80 {
        format!(
            "Excellent repository health with a score of {total}/100. \
             Strong practices across multiple dimensions."
        )
    } else if total >= 60 {
        format!(
            "Good potential with a score of {total}/100. \
             Solid foundations with room for improvement."
        )
    } else if total >= 40 {
        format!("Moderate score of {total}/100. Several areas need attention to improve quality.")
    } else {
        format!(
            "Score of {total}/100 indicates significant room for improvement. \
             Focus on the recommendations below."
        )
    };

    if strengths.is_empty() {
        strengths.push("Repository has basic structure in place".to_string());
    }
    if improvements.is_empty() {
        improvements.push("Continue maintaining current standards".to_string());
    }

    Summary {
        methodology: METHODOLOGY.to_string(),
        analysis,
        strengths,
        improvements,
    }
}

pub fn rule_based_roadmap(meta: &RepositoryMetadata, analysis: &Analysis) -> Roadmap {
    let mut phases = Vec::new();

    let mut critical_tasks = Vec::new();
    if !analysis.readme.has_installation || !analysis.readme.has_usage {
        critical_tasks.push(Task::new(
            "Create Comprehensive README.md",
            "Add project overview, installation instructions, usage examples, and screenshots.",
            Priority::High,
        ));
    }
    if !analysis.structure.organized {
        critical_tasks.push(Task::new(
            "Restructure Project Folders",
            "Organize code into clear folders (src/, tests/, docs/, config/).",
            Priority::High,
        ));
    }
    if meta.repo.license.is_none() {
        critical_tasks.push(Task::new(
            "Add Open-Source License",
            "Add MIT or Apache 2.0 license.",
            Priority::High,
        ));
    }
    if !critical_tasks.is_empty() {
        phases.push(RoadmapPhase {
            name: "Critical Foundation".to_string(),
            timeline: "Week 1-2".to_string(),
            tasks: critical_tasks,
        });
    }

    let mut quality_tasks = Vec::new();
    if !analysis.has_tests {
        quality_tasks.push(Task::new(
            "Add Unit Tests",
            "Write tests for core functionality. Start with 50%+ coverage.",
            Priority::High,
        ));
    }
    quality_tasks.push(Task::new(
        "Improve Code Readability",
        "Add meaningful comments, use descriptive variable names.",
        Priority::Medium,
    ));
    phases.push(RoadmapPhase {
        name: "Code Quality & Testing".to_string(),
        timeline: "Week 3-4".to_string(),
        tasks: quality_tasks,
    });

    // Pushed even when both practices are already in place, matching the
    // phase list consumers expect.
    let mut git_tasks = Vec::new();
    if !analysis.git_practices.uses_feature_branches {
        git_tasks.push(Task::new(
            "Use Feature Branches",
            "Create feature branches for each new feature.",
            Priority::High,
        ));
    }
    if !analysis.git_practices.uses_prs {
        git_tasks.push(Task::new(
            "Create Pull Requests",
            "Use PRs to merge features.",
            Priority::High,
        ));
    }
    phases.push(RoadmapPhase {
        name: "Version Control Best Practices".to_string(),
        timeline: "Week 5-6".to_string(),
        tasks: git_tasks,
    });

    phases.push(RoadmapPhase {
        name: "Professional Polish".to_string(),
        timeline: "Week 7-8+".to_string(),
        tasks: vec![
            Task::new(
                "Add CI/CD Pipeline",
                "Set up GitHub Actions to auto-run tests.",
                Priority::High,
            ),
            Task::new(
                "Add Project Demo",
                "Add screenshots or GIF demos to README.",
                Priority::Medium,
            ),
            Task::new(
                "Deploy Your Project",
                "Deploy to Vercel, Heroku, or GitHub Pages.",
                Priority::Low,
            ),
        ],
    });

    Roadmap {
        phases,
        outcomes: vec![
            "✓ Repository looks professional to recruiters".to_string(),
            "✓ Code is clean, tested, and documented".to_string(),
            "✓ Follows industry best practices".to_string(),
            "✓ Portfolio-ready repository".to_string(),
        ],
    }
}
