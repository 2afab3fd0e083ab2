//! GitHub REST fetch layer.
//!
//! Each endpoint is requested independently: secondary endpoints degrade to
//! typed empty defaults when they fail, while the primary repository record
//! failing is fatal. No retries anywhere; resilience is default substitution.

use crate::error::{GradeError, Result};
use crate::types::metadata::{
    Branch, CommitRecord, Contributor, DirEntry, IssueRecord, PullRequest, ReadmeBlob,
    RepositoryMetadata, RepoInfo,
};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("repograde/", env!("CARGO_PKG_VERSION"));

/// Parse a repository reference: a full github.com URL (https or ssh), or a
/// bare `owner/repo`.
pub fn parse_repo_reference(input: &str) -> Result<(String, String)> {
    static URL: OnceLock<Regex> = OnceLock::new();
    static BARE: OnceLock<Regex> = OnceLock::new();
    let url_pattern = URL.get_or_init(|| {
        Regex::new(r"github\.com[:/]([^/\s]+)/([^/\s]+)").expect("url pattern must compile")
    });
    let bare_pattern = BARE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").expect("bare pattern must compile")
    });

    let trimmed = input.trim().trim_end_matches('/');
    let captures = url_pattern
        .captures(trimmed)
        .or_else(|| bare_pattern.captures(trimmed))
        .ok_or_else(|| GradeError::InvalidRepoUrl(input.to_string()))?;

    let owner = captures[1].to_string();
    let repo = captures[2].trim_end_matches(".git").to_string();
    Ok((owner, repo))
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            token,
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn get(&self, url: &str) -> reqwest::Result<reqwest::blocking::Response> {
        debug!(url, "GET");
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request.send()
    }

    /// Fetch the primary repository record. Unlike the secondary endpoints,
    /// failure here aborts the pipeline.
    fn fetch_repo(&self, owner: &str, repo: &str) -> Result<RepoInfo> {
        let url = format!("{}/repos/{owner}/{repo}", self.api_base);
        let response = self.get(&url)?;
        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => Err(GradeError::RepoNotFound(format!("{owner}/{repo}"))),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                let body = response.text().unwrap_or_default();
                if body.to_lowercase().contains("rate limit") {
                    Err(GradeError::RateLimited)
                } else {
                    Err(GradeError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    })
                }
            }
            status if status.is_success() => Ok(response.json()?),
            status => Err(GradeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            }),
        }
    }

    /// Fetch a secondary endpoint, substituting the default value when the
    /// request or decode fails for any reason.
    fn fetch_or_default<T>(&self, endpoint: &str, url: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let outcome = self
            .get(url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<T>());
        match outcome {
            Ok(value) => value,
            Err(err) => {
                warn!(endpoint, error = %err, "endpoint degraded to default value");
                T::default()
            }
        }
    }

    fn fetch_readme(&self, owner: &str, repo: &str) -> Option<ReadmeBlob> {
        let url = format!("{}/repos/{owner}/{repo}/readme", self.api_base);
        let outcome = self
            .get(&url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<ReadmeBlob>());
        match outcome {
            Ok(blob) => Some(blob),
            Err(err) => {
                warn!(endpoint = "readme", error = %err, "no readme available");
                None
            }
        }
    }

    /// Assemble a full metadata snapshot for `owner/repo`.
    pub fn fetch_repository(&self, owner: &str, repo: &str) -> Result<RepositoryMetadata> {
        let info = self.fetch_repo(owner, repo)?;

        let base = format!("{}/repos/{owner}/{repo}", self.api_base);
        let contributors: Vec<Contributor> =
            self.fetch_or_default("contributors", &format!("{base}/contributors"));
        let commits: Vec<CommitRecord> =
            self.fetch_or_default("commits", &format!("{base}/commits?per_page=100"));
        let issues: Vec<IssueRecord> =
            self.fetch_or_default("issues", &format!("{base}/issues?state=all&per_page=100"));
        let languages: BTreeMap<String, u64> =
            self.fetch_or_default("languages", &format!("{base}/languages"));
        let branches: Vec<Branch> = self.fetch_or_default("branches", &format!("{base}/branches"));
        let pull_requests: Vec<PullRequest> =
            self.fetch_or_default("pulls", &format!("{base}/pulls?state=all&per_page=100"));
        let contents: Vec<DirEntry> = self.fetch_or_default("contents", &format!("{base}/contents"));
        let readme = self.fetch_readme(owner, repo);

        Ok(RepositoryMetadata {
            repo: info,
            languages,
            contents,
            readme,
            commits,
            branches,
            pull_requests,
            contributors,
            issues,
        })
    }
}
