//! GitHub pull request comment reporter
//!
//! Posts the scan result as a Markdown comment on an issue or pull request.
//! The comment carries a hidden marker so that later runs update it in place.
//!
//! Configuration (environment):
//! - `LOCKDIFF_REPORTER_GITHUB`: enables the reporter when truthy
//! - `LOCKDIFF_REPORTER_GITHUB_TOKEN`, `_OWNER`, `_REPO`, `_ISSUE_NUMBER`: required
//! - `LOCKDIFF_REPORTER_GITHUB_API_URL`: optional, for GitHub Enterprise

use crate::domain::DependencyCollectionDiff;
use crate::error::{ConfigError, ReportError};
use crate::output::MarkdownFormatter;
use crate::report::client::{ApiRequest, HttpClient};
use crate::report::Reporter;
use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Method;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Hidden marker identifying comments written by this reporter
pub const COMMENT_MARKER: &str = "<!-- lockdiff -->";

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested from the REST API
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

const ENV_ENABLED: &str = "LOCKDIFF_REPORTER_GITHUB";
const ENV_TOKEN: &str = "LOCKDIFF_REPORTER_GITHUB_TOKEN";
const ENV_OWNER: &str = "LOCKDIFF_REPORTER_GITHUB_OWNER";
const ENV_REPO: &str = "LOCKDIFF_REPORTER_GITHUB_REPO";
const ENV_ISSUE_NUMBER: &str = "LOCKDIFF_REPORTER_GITHUB_ISSUE_NUMBER";
const ENV_API_URL: &str = "LOCKDIFF_REPORTER_GITHUB_API_URL";

/// Settings for [`GitHubReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub api_url: String,
}

impl GitHubConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`
    ///
    /// Returns `Ok(None)` when the reporter is disabled or a required
    /// variable is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if !get(ENV_ENABLED).is_some_and(|v| is_truthy(&v)) {
            return Ok(None);
        }

        let (Some(token), Some(owner), Some(repo), Some(issue_number)) = (
            get(ENV_TOKEN),
            get(ENV_OWNER),
            get(ENV_REPO),
            get(ENV_ISSUE_NUMBER),
        ) else {
            warn!(
                "{} is set but one of {}, {}, {} or {} is missing; GitHub reporter disabled",
                ENV_ENABLED, ENV_TOKEN, ENV_OWNER, ENV_REPO, ENV_ISSUE_NUMBER
            );
            return Ok(None);
        };

        let issue_number = issue_number
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnv {
                name: ENV_ISSUE_NUMBER.to_string(),
                value: issue_number.clone(),
                message: e.to_string(),
            })?;

        let api_url = get(ENV_API_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Some(Self {
            token,
            owner,
            repo,
            issue_number,
            api_url,
        }))
    }

    /// URL listing and creating comments on the issue
    pub fn comments_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url, self.owner, self.repo, self.issue_number
        )
    }

    /// URL of a single issue comment
    pub fn comment_url(&self, id: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/comments/{}",
            self.api_url, self.owner, self.repo, id
        )
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Issue comment as returned by the GitHub API
#[derive(Debug, Deserialize)]
struct IssueComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

/// Returns the id of the first comment carrying the marker
fn find_marked_comment(comments: &[IssueComment]) -> Option<u64> {
    comments
        .iter()
        .find(|c| c.body.as_deref().is_some_and(|b| b.contains(COMMENT_MARKER)))
        .map(|c| c.id)
}

/// What to do with the pull request comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentAction {
    Create,
    Update(u64),
    Skip,
}

/// Picks the comment action from the existing comments
///
/// Without changes an earlier report is still overwritten, so that it does
/// not keep listing changes that were reverted.
fn plan_comment(comments: &[IssueComment], has_changes: bool) -> CommentAction {
    match (find_marked_comment(comments), has_changes) {
        (Some(id), _) => CommentAction::Update(id),
        (None, true) => CommentAction::Create,
        (None, false) => CommentAction::Skip,
    }
}

/// Builds the comment body
fn comment_body(markdown: &str) -> String {
    format!("{}\n### Lock file changes\n\n{}", COMMENT_MARKER, markdown)
}

/// Reporter posting a pull request comment
pub struct GitHubReporter {
    config: Option<GitHubConfig>,
    client: HttpClient,
    formatter: MarkdownFormatter,
}

impl GitHubReporter {
    /// Create a reporter; `None` config means disabled
    pub fn new(config: Option<GitHubConfig>, client: HttpClient) -> Self {
        Self {
            config,
            client,
            formatter: MarkdownFormatter::new(),
        }
    }

    fn request<'a>(
        &self,
        method: Method,
        url: &'a str,
        config: &'a GitHubConfig,
    ) -> ApiRequest<'a> {
        ApiRequest::new(method, url)
            .accept(GITHUB_MEDIA_TYPE)
            .token(&config.token)
    }

    /// Create a reporter configured from the environment
    pub fn from_env(client: HttpClient) -> Result<Self, ConfigError> {
        Ok(Self::new(GitHubConfig::from_env()?, client))
    }
}

#[async_trait]
impl Reporter for GitHubReporter {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn supports(&self) -> bool {
        self.config.is_some()
    }

    async fn report(
        &self,
        diffs: &IndexMap<PathBuf, DependencyCollectionDiff>,
    ) -> Result<(), ReportError> {
        let Some(config) = &self.config else {
            return Ok(());
        };

        let list_url = format!("{}?per_page=100", config.comments_url());
        let comments: Vec<IssueComment> = self
            .client
            .send_json(self.name(), &self.request(Method::GET, &list_url, config))
            .await?;

        let body = serde_json::json!({
            "body": comment_body(&self.formatter.render(diffs)),
        });

        match plan_comment(&comments, !diffs.is_empty()) {
            CommentAction::Update(id) => {
                let url = config.comment_url(id);
                self.client
                    .send(
                        self.name(),
                        &self.request(Method::PATCH, &url, config).json(&body),
                    )
                    .await?;
                info!(comment_id = id, "updated GitHub comment");
            }
            CommentAction::Create => {
                let url = config.comments_url();
                self.client
                    .send(
                        self.name(),
                        &self.request(Method::POST, &url, config).json(&body),
                    )
                    .await?;
                info!(issue = config.issue_number, "created GitHub comment");
            }
            CommentAction::Skip => {
                debug!("no lock file changes and no earlier comment, skipping GitHub comment");
            }
        }

        Ok(())
    }
}
