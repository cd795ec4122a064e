//! GitHub Platform Client
//!
//! Outbound collaborator for the version-control platform: lists a pull
//! request's changed files and publishes the finished review (summary
//! comment plus score label). The `PlatformClient` trait is the seam the
//! pipeline depends on; tests swap in an in-memory implementation.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use thiserror::Error;
use tracing::debug;

use crate::models::{ChangedFile, CommentKind, CommentPriority, ReviewResult};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT_VALUE: &str = "reviewbot";

/// Errors from the platform collaborator. Fatal to the current run.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Platform request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Platform API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Operations the pipeline needs from the version-control platform.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn list_changed_files(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<Vec<ChangedFile>, PlatformError>;

    async fn post_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        review: &ReviewResult,
    ) -> Result<(), PlatformError>;

    async fn apply_score_label(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        score: u8,
    ) -> Result<(), PlatformError>;
}

/// GitHub REST implementation of `PlatformClient`.
pub struct GithubClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_API_BASE.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PlatformError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PlatformClient for GithubClient {
    async fn list_changed_files(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<Vec<ChangedFile>, PlatformError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/repos/{owner}/{repo}/pulls/{pull_number}/files?per_page=100"),
            )
            .send()
            .await?;
        let files = Self::check(response).await?.json::<Vec<ChangedFile>>().await?;
        debug!(owner, repo, pull_number, files = files.len(), "fetched changed files");
        Ok(files)
    }

    async fn post_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        review: &ReviewResult,
    ) -> Result<(), PlatformError> {
        let body = serde_json::json!({ "body": format_review_body(review) });
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/repos/{owner}/{repo}/issues/{pull_number}/comments"),
            )
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn apply_score_label(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        score: u8,
    ) -> Result<(), PlatformError> {
        let body = serde_json::json!({ "labels": [score_label(score)] });
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/repos/{owner}/{repo}/issues/{pull_number}/labels"),
            )
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Markdown body for the summary comment. Presentation only, not
/// load-bearing for any parser.
pub fn format_review_body(review: &ReviewResult) -> String {
    let mut body = format!(
        "## {} AI Code Review\n\n**Score: {}/100**\n\n{}\n",
        score_emoji(review.overall_score),
        review.overall_score,
        review.summary
    );

    if !review.recommendations.is_empty() {
        body.push_str("\n### Recommendations\n");
        for (index, recommendation) in review.recommendations.iter().enumerate() {
            body.push_str(&format!("{}. {}\n", index + 1, recommendation));
        }
    }

    if !review.comments.is_empty() {
        body.push_str("\n### Comments\n");
        for comment in &review.comments {
            let location = match comment.line {
                Some(line) => format!("`{}:{}`", comment.file, line),
                None => format!("`{}`", comment.file),
            };
            body.push_str(&format!(
                "- {} {} **{}** {}: {}\n",
                priority_emoji(comment.priority),
                kind_emoji(comment.kind),
                location,
                kind_name(comment.kind),
                comment.body
            ));
        }
    }

    body
}

/// Label applied to the pull request for its score band.
pub fn score_label(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "review: excellent",
        80..=89 => "review: good",
        70..=79 => "review: needs-improvement",
        60..=69 => "review: review-required",
        _ => "review: needs-work",
    }
}

fn score_emoji(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "🎉",
        80..=89 => "✅",
        70..=79 => "👍",
        60..=69 => "⚠️",
        _ => "🚨",
    }
}

fn priority_emoji(priority: CommentPriority) -> &'static str {
    match priority {
        CommentPriority::High => "🔴",
        CommentPriority::Medium => "🟡",
        CommentPriority::Low => "🟢",
    }
}

fn kind_emoji(kind: CommentKind) -> &'static str {
    match kind {
        CommentKind::Suggestion => "💡",
        CommentKind::Improvement => "🔧",
        CommentKind::Issue => "❗",
        CommentKind::Praise => "👏",
    }
}

fn kind_name(kind: CommentKind) -> &'static str {
    match kind {
        CommentKind::Suggestion => "suggestion",
        CommentKind::Improvement => "improvement",
        CommentKind::Issue => "issue",
        CommentKind::Praise => "praise",
    }
}
