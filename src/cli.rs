use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repograde",
    version,
    about = "Grade public GitHub repositories and generate improvement roadmaps"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the quality score and breakdown
    Score(ScoreCommand),
    /// Score plus a narrative summary
    Summary(SummaryCommand),
    /// Score plus a phased improvement roadmap
    Roadmap(RoadmapCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Repository reference: owner/repo or a github.com URL
    #[arg(required_unless_present = "snapshot", conflicts_with = "snapshot")]
    pub repo: Option<String>,

    /// Score a saved metadata snapshot instead of fetching
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,

    /// Exit with code 2 when the total score is below this threshold
    #[arg(long)]
    pub fail_under: Option<u32>,

    /// Write the fetched metadata snapshot to this file
    #[arg(long)]
    pub snapshot_out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SummaryCommand {
    #[arg(required_unless_present = "snapshot", conflicts_with = "snapshot")]
    pub repo: Option<String>,

    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RoadmapCommand {
    #[arg(required_unless_present = "snapshot", conflicts_with = "snapshot")]
    pub repo: Option<String>,

    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}
