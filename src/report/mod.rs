pub mod json;
pub mod md;

use crate::analyze::Analysis;
use crate::error::GradeError;
use crate::types::narrative::{Roadmap, Summary};
use crate::types::scoring::ScoreReport;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Everything a single grading run produces. Summary and roadmap are present
/// only for the subcommands that request them.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub repository: String,
    pub score: ScoreReport,
    pub analysis: Analysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<Roadmap>,
}

pub fn render(report: &GradeReport, format: OutputFormat) -> Result<String, GradeError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(GradeError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
