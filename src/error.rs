use thiserror::Error;

#[derive(Error, Debug)]
pub enum GradeError {
    #[error("unrecognized repository reference: {0} (expected owner/repo or a github.com URL)")]
    InvalidRepoUrl(String),

    #[error("repository not found: {0}")]
    RepoNotFound(String),

    #[error(
        "GitHub API rate limit exceeded for unauthenticated requests; \
         set GITHUB_TOKEN or [github].token in repograde.toml and retry"
    )]
    RateLimited,

    #[error("GitHub API returned {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("snapshot file not found: {0}")]
    SnapshotNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GradeError>;
