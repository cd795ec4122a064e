//! AI-assisted pull request reviewer
//!
//! Receives signed webhook events from the version-control platform,
//! scans the changed diffs for risk patterns, asks the review service
//! for a structured assessment, and publishes it back onto the pull
//! request.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;

pub use models::{
    AnalysisReport, ChangeSummary, ChangedFile, CommentKind, CommentPriority, FileStatus, Issue,
    IssueCategory, IssueKind, ReviewComment, ReviewResult, WebhookPayload,
};

pub use services::{
    build_prompt, parse_review, scan_patch, ClaudeClient, CodeAnalyzer, CompletionClient,
    GithubClient, PipelineError, PlatformClient, ReviewPipeline, SignatureVerifier,
};

/// Application state shared across handlers
///
/// The collaborators are `None` when their credentials are not
/// configured; affected runs then fail with a 500 while the rest of the
/// service keeps working.
pub struct AppState {
    pub config: Config,
    pub platform: Option<Arc<dyn PlatformClient>>,
    pub completion: Option<Arc<dyn CompletionClient>>,
}
