pub mod fallback;
pub mod provider;

use crate::analyze::Analysis;
use crate::types::metadata::RepositoryMetadata;
use crate::types::narrative::{Roadmap, Summary};
use crate::types::scoring::ScoreReport;
use provider::{NarrativeError, NarrativeProvider};
use serde::Deserialize;
use tracing::warn;

const SUMMARY_SYSTEM_PROMPT: &str = "You are an honest mentor and code reviewer.";
const ROADMAP_SYSTEM_PROMPT: &str = "You are an expert software project manager and mentor.";

const SUMMARY_MAX_TOKENS: u32 = 1200;
const ROADMAP_MAX_TOKENS: u32 = 1500;

/// Produce the narrative summary. Attempts the collaborator when one is
/// configured; any failure is logged and answered with the rule-based
/// fallback, never an error.
pub fn generate_summary(
    provider: Option<&dyn NarrativeProvider>,
    score: &ScoreReport,
    meta: &RepositoryMetadata,
    analysis: &Analysis,
) -> Summary {
    if let Some(provider) = provider {
        match summary_from_provider(provider, score, meta, analysis) {
            Ok(summary) => return summary,
            Err(err) => {
                warn!(error = %err, "narrative summary failed, falling back to rule-based summary");
            }
        }
    }
    fallback::rule_based_summary(score)
}

/// Produce the improvement roadmap, with the same two-branch strategy as
/// [`generate_summary`].
pub fn generate_roadmap(
    provider: Option<&dyn NarrativeProvider>,
    score: &ScoreReport,
    meta: &RepositoryMetadata,
    analysis: &Analysis,
) -> Roadmap {
    if let Some(provider) = provider {
        match roadmap_from_provider(provider, score, meta, analysis) {
            Ok(roadmap) => return roadmap,
            Err(err) => {
                warn!(error = %err, "narrative roadmap failed, falling back to rule-based roadmap");
            }
        }
    }
    fallback::rule_based_roadmap(meta, analysis)
}

/// Reply contract for summaries; serde enforces the required keys.
#[derive(Deserialize)]
struct SummaryReply {
    analysis: String,
    strengths: Vec<String>,
    improvements: Vec<String>,
}

fn summary_from_provider(
    provider: &dyn NarrativeProvider,
    score: &ScoreReport,
    meta: &RepositoryMetadata,
    analysis: &Analysis,
) -> Result<Summary, NarrativeError> {
    let prompt = summary_prompt(score, meta, analysis);
    let content = provider.complete(SUMMARY_SYSTEM_PROMPT, &prompt, SUMMARY_MAX_TOKENS)?;
    let reply: SummaryReply = serde_json::from_str(&content)?;
    Ok(Summary {
        methodology: "LLM-powered analysis across 7 dimensions.".to_string(),
        analysis: reply.analysis,
        strengths: reply.strengths,
        improvements: reply.improvements,
    })
}

fn roadmap_from_provider(
    provider: &dyn NarrativeProvider,
    score: &ScoreReport,
    meta: &RepositoryMetadata,
    analysis: &Analysis,
) -> Result<Roadmap, NarrativeError> {
    let prompt = roadmap_prompt(score, meta, analysis);
    let content = provider.complete(ROADMAP_SYSTEM_PROMPT, &prompt, ROADMAP_MAX_TOKENS)?;
    let roadmap: Roadmap = serde_json::from_str(&content)?;
    Ok(roadmap)
}

fn summary_prompt(score: &ScoreReport, meta: &RepositoryMetadata, analysis: &Analysis) -> String {
    let repo = &meta.repo;
    format!(
        "You are an expert code reviewer. Given the repository metadata and score, \
         produce a concise JSON with keys: analysis (2-3 sentences), strengths (array of 3-5), \
         improvements (array of 3-5).\n\n\
         Repository: {}\nDescription: {}\nStars: {} | Forks: {}\n\
         Files: {} | Folders: {} | Has tests: {}\n\
         README score: {} | Commit consistency: {} | Git practices score: {}\n\
         Current Score: {}/100\n\n\
         Respond ONLY with valid JSON. Use arrays for strengths/improvements.",
        repo.full_name,
        repo.description.as_deref().unwrap_or("No description"),
        repo.stargazers_count,
        repo.forks_count,
        analysis.structure.file_count,
        analysis.structure.folder_count,
        if analysis.has_tests { "Yes" } else { "No" },
        analysis.readme.score,
        analysis.commits.consistency,
        analysis.git_practices.score,
        score.total_score,
    )
}

fn roadmap_prompt(score: &ScoreReport, meta: &RepositoryMetadata, analysis: &Analysis) -> String {
    format!(
        "You are a software project mentor. Given the repository metadata and score, \
         produce a practical 4-phase roadmap as JSON with keys: phases (array) and outcomes \
         (array). Each phase must include phase, timeline and tasks (title, description, \
         priority).\n\n\
         Repository: {}\nScore: {}/100\nFiles: {} | Folders: {}\nHas tests: {}\n\
         README score: {}\nCommit consistency: {}\nGit practices score: {}\n\n\
         Return ONLY valid JSON.",
        meta.repo.full_name,
        score.total_score,
        analysis.structure.file_count,
        analysis.structure.folder_count,
        if analysis.has_tests { "Yes" } else { "No" },
        analysis.readme.score,
        analysis.commits.consistency,
        analysis.git_practices.score,
    )
}
