mod analyze;
mod cli;
mod config;
mod error;
mod fetch;
mod narrative;
mod report;
mod types;

use crate::config::GradeConfig;
use crate::error::{GradeError, Result};
use crate::narrative::provider::{NarrativeProvider, OpenAiProvider};
use crate::report::{GradeReport, OutputFormat};
use crate::types::metadata::RepositoryMetadata;
use chrono::Utc;
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const SCORE_BELOW_THRESHOLD: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Metadata either comes from a saved snapshot or a live fetch; the two
/// selectors are mutually exclusive at the clap level.
fn load_metadata(
    repo: Option<&str>,
    snapshot: Option<&Path>,
    config: &GradeConfig,
) -> Result<RepositoryMetadata> {
    if let Some(path) = snapshot {
        return fetch::snapshot::load_snapshot(path);
    }
    let reference = repo.ok_or_else(|| GradeError::InvalidRepoUrl(String::new()))?;
    let (owner, name) = fetch::github::parse_repo_reference(reference)?;
    let mut client = fetch::github::GitHubClient::new(config.github_token())?;
    if let Some(api_base) = config.github_api_base() {
        client = client.with_api_base(api_base);
    }
    client.fetch_repository(&owner, &name)
}

fn narrative_provider(config: &GradeConfig) -> Option<OpenAiProvider> {
    let api_key = config.narrative_api_key()?;
    let mut provider = OpenAiProvider::new(api_key);
    if let Some(base_url) = config.narrative_base_url() {
        provider = provider.with_base_url(base_url);
    }
    if let Some(model) = config.narrative_model() {
        provider = provider.with_model(model);
    }
    Some(provider)
}

fn output_format(format: cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

struct GradeRun {
    meta: RepositoryMetadata,
    analysis: analyze::Analysis,
    score: types::scoring::ScoreReport,
}

fn grade(
    repo: Option<&str>,
    snapshot: Option<&Path>,
    snapshot_out: Option<&Path>,
    config: &GradeConfig,
) -> Result<GradeRun> {
    let meta = load_metadata(repo, snapshot, config)?;
    if let Some(path) = snapshot_out {
        fetch::snapshot::write_snapshot(path, &meta)?;
    }
    let analysis = analyze::analyze_metadata(&meta, Utc::now());
    let score = analyze::compute_score(&meta, &analysis);
    Ok(GradeRun {
        meta,
        analysis,
        score,
    })
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let config = config::load_config(Path::new("."))?;

    match cli.command {
        cli::Commands::Score(cmd) => {
            let run = grade(
                cmd.repo.as_deref(),
                cmd.snapshot.as_deref(),
                cmd.snapshot_out.as_deref(),
                &config,
            )?;
            let report = GradeReport {
                repository: run.meta.repo.full_name.clone(),
                score: run.score,
                analysis: run.analysis,
                summary: None,
                roadmap: None,
            };
            println!("{}", report::render(&report, output_format(cmd.format))?);

            if let Some(threshold) = cmd.fail_under {
                if report.score.total_score < threshold {
                    eprintln!(
                        "score {} is below the required threshold {}",
                        report.score.total_score, threshold
                    );
                    return Ok(exit_code::SCORE_BELOW_THRESHOLD);
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Summary(cmd) => {
            let run = grade(cmd.repo.as_deref(), cmd.snapshot.as_deref(), None, &config)?;
            let provider = narrative_provider(&config);
            let summary = narrative::generate_summary(
                provider.as_ref().map(|p| p as &dyn NarrativeProvider),
                &run.score,
                &run.meta,
                &run.analysis,
            );
            let report = GradeReport {
                repository: run.meta.repo.full_name.clone(),
                score: run.score,
                analysis: run.analysis,
                summary: Some(summary),
                roadmap: None,
            };
            println!("{}", report::render(&report, output_format(cmd.format))?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Roadmap(cmd) => {
            let run = grade(cmd.repo.as_deref(), cmd.snapshot.as_deref(), None, &config)?;
            let provider = narrative_provider(&config);
            let roadmap = narrative::generate_roadmap(
                provider.as_ref().map(|p| p as &dyn NarrativeProvider),
                &run.score,
                &run.meta,
                &run.analysis,
            );
            let report = GradeReport {
                repository: run.meta.repo.full_name.clone(),
                score: run.score,
                analysis: run.analysis,
                summary: None,
                roadmap: Some(roadmap),
            };
            println!("{}", report::render(&report, output_format(cmd.format))?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
