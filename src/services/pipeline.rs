//! Review Pipeline
//!
//! Sequences one review run: fetch changed files, scan and aggregate,
//! build the prompt, request the completion, parse the reply, publish
//! the comment and the score label. Strictly downstream data flow; no
//! retries; a failure at any stage ends the run.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::models::ReviewResult;
use crate::services::analyzer::CodeAnalyzer;
use crate::services::claude::{CompletionClient, CompletionError};
use crate::services::github::{PlatformClient, PlatformError};
use crate::services::parser::parse_review;
use crate::services::prompt::build_prompt;

/// Errors ending a pipeline run. Affects only the current run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// What a completed run produced, for logging and the webhook response.
#[derive(Debug)]
pub struct ReviewOutcome {
    pub files_analyzed: usize,
    pub issues_detected: usize,
    pub review: ReviewResult,
}

/// One-run orchestrator over the two external collaborators.
///
/// Holds no per-run state; every model is constructed fresh inside
/// `run`, so concurrent runs share nothing mutable.
pub struct ReviewPipeline {
    platform: Arc<dyn PlatformClient>,
    completion: Arc<dyn CompletionClient>,
}

impl ReviewPipeline {
    pub fn new(platform: Arc<dyn PlatformClient>, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            platform,
            completion,
        }
    }

    /// Review one pull request end to end.
    ///
    /// Publishing is two independent calls (comment, then label) with
    /// at-most-once semantics: if the label call fails after the comment
    /// posted, the run fails without rolling the comment back.
    pub async fn run(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<ReviewOutcome, PipelineError> {
        let files = self
            .platform
            .list_changed_files(owner, repo, pull_number)
            .await?;

        let report = CodeAnalyzer::new().analyze(files);
        info!(
            owner,
            repo,
            pull_number,
            files = report.summary.total_files,
            issues = report.issues.len(),
            "analysis completed"
        );

        let prompt = build_prompt(&report);
        let reply = self.completion.complete(&prompt).await?;
        let review = parse_review(&reply);
        info!(
            score = review.overall_score,
            comments = review.comments.len(),
            "review generated"
        );

        self.platform
            .post_review_comment(owner, repo, pull_number, &review)
            .await?;
        self.platform
            .apply_score_label(owner, repo, pull_number, review.overall_score)
            .await?;
        info!(owner, repo, pull_number, "review published");

        Ok(ReviewOutcome {
            files_analyzed: report.summary.total_files,
            issues_detected: report.issues.len(),
            review,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChangedFile, FileStatus};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Call log shared between the mocks and the assertions.
    #[derive(Debug, Default)]
    struct CallLog {
        calls: Mutex<Vec<String>>,
    }

    impl CallLog {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
        fn snapshot(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    struct MockPlatform {
        log: Arc<CallLog>,
        fail_label: bool,
    }

    #[async_trait]
    impl PlatformClient for MockPlatform {
        async fn list_changed_files(
            &self,
            _owner: &str,
            _repo: &str,
            _pull_number: u64,
        ) -> Result<Vec<ChangedFile>, PlatformError> {
            self.log.record("list_files");
            Ok(vec![ChangedFile {
                filename: "app.ts".to_string(),
                status: FileStatus::Modified,
                additions: 2,
                deletions: 0,
                changes: 2,
                patch: Some("@@ -1,1 +1,2 @@\n+console.log(password)\n+ok".to_string()),
            }])
        }

        async fn post_review_comment(
            &self,
            _owner: &str,
            _repo: &str,
            _pull_number: u64,
            _review: &ReviewResult,
        ) -> Result<(), PlatformError> {
            self.log.record("post_comment");
            Ok(())
        }

        async fn apply_score_label(
            &self,
            _owner: &str,
            _repo: &str,
            _pull_number: u64,
            _score: u8,
        ) -> Result<(), PlatformError> {
            self.log.record("apply_label");
            if self.fail_label {
                return Err(PlatformError::Api {
                    status: 502,
                    message: "label backend down".to_string(),
                });
            }
            Ok(())
        }
    }

    struct MockCompletion {
        log: Arc<CallLog>,
        reply: Result<String, ()>,
    }

    #[async_trait]
    impl CompletionClient for MockCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
            self.log.record("complete");
            // The prompt must carry the analysis downstream
            assert!(prompt.contains("app.ts"));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(CompletionError::MissingText),
            }
        }
    }

    fn structured_reply() -> String {
        "OVERALL_SCORE: 64\nSUMMARY:\nRisky logging.\nRECOMMENDATIONS:\n1. Remove the debug log\n"
            .to_string()
    }

    #[tokio::test]
    async fn successful_run_publishes_comment_then_label() {
        let log = Arc::new(CallLog::default());
        let pipeline = ReviewPipeline::new(
            Arc::new(MockPlatform {
                log: log.clone(),
                fail_label: false,
            }),
            Arc::new(MockCompletion {
                log: log.clone(),
                reply: Ok(structured_reply()),
            }),
        );

        let outcome = pipeline.run("octocat", "hello", 7).await.unwrap();

        assert_eq!(outcome.files_analyzed, 1);
        assert_eq!(outcome.issues_detected, 2); // security + quality on the same line
        assert_eq!(outcome.review.overall_score, 64);
        assert_eq!(
            log.snapshot(),
            vec!["list_files", "complete", "post_comment", "apply_label"]
        );
    }

    #[tokio::test]
    async fn completion_failure_skips_publishing() {
        let log = Arc::new(CallLog::default());
        let pipeline = ReviewPipeline::new(
            Arc::new(MockPlatform {
                log: log.clone(),
                fail_label: false,
            }),
            Arc::new(MockCompletion {
                log: log.clone(),
                reply: Err(()),
            }),
        );

        let result = pipeline.run("octocat", "hello", 7).await;

        assert!(matches!(result, Err(PipelineError::Completion(_))));
        assert_eq!(log.snapshot(), vec!["list_files", "complete"]);
    }

    #[tokio::test]
    async fn label_failure_after_comment_is_reported_not_rolled_back() {
        let log = Arc::new(CallLog::default());
        let pipeline = ReviewPipeline::new(
            Arc::new(MockPlatform {
                log: log.clone(),
                fail_label: true,
            }),
            Arc::new(MockCompletion {
                log: log.clone(),
                reply: Ok(structured_reply()),
            }),
        );

        let result = pipeline.run("octocat", "hello", 7).await;

        assert!(matches!(result, Err(PipelineError::Platform(_))));
        // The comment went out and stays out
        assert_eq!(
            log.snapshot(),
            vec!["list_files", "complete", "post_comment", "apply_label"]
        );
    }
}
