//! Inbound webhook payload models
//!
//! The subset of the platform's pull-request event payload the pipeline
//! actually reads. Decoded only after the raw bytes pass signature
//! verification.

use serde::{Deserialize, Serialize};

/// Top-level webhook event payload
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub action: String,
    #[serde(default)]
    pub pull_request: Option<PullRequestInfo>,
    pub repository: RepositoryInfo,
}

/// Pull request fields carried by the event
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: String,
    pub head: GitRefInfo,
    pub base: GitRefInfo,
    pub user: UserInfo,
}

/// Branch head/base reference
#[derive(Debug, Clone, Deserialize)]
pub struct GitRefInfo {
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// Event actor / repository owner
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub login: String,
}

/// Repository the event belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: UserInfo,
}

/// Summary of a processed run, returned in the webhook 200 body
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedEvent {
    pub pull_number: u64,
    pub files_analyzed: usize,
    pub issues_detected: usize,
    pub overall_score: u8,
    pub comments_posted: usize,
}
