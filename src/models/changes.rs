//! Changed-file and analysis models
//!
//! Data structures describing a pull request's changed files and the
//! issues the diff scanner detects in them.

use serde::{Deserialize, Serialize};

/// Status of a changed file as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// One file touched by a pull request
///
/// Deserialized directly from the platform's pull-request files endpoint.
/// `patch` is absent for binary or oversized files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    pub status: FileStatus,
    pub additions: u32,
    pub deletions: u32,
    pub changes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

/// Issue kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
    Info,
}

/// Issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    Syntax,
    Style,
    Security,
    Performance,
    BestPractice,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Style => "style",
            Self::Security => "security",
            Self::Performance => "performance",
            Self::BestPractice => "best-practice",
        }
    }
}

/// A single finding produced by the diff scanner
///
/// Severity is fixed per detection rule (security = 8, quality = 5),
/// never derived from content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub category: IssueCategory,
    pub message: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    /// 1-10
    pub severity: u8,
}

/// Per-run change totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub total_files: usize,
    pub total_additions: u32,
    pub total_deletions: u32,
    /// Distinct detected languages, first-encountered order
    pub languages: Vec<String>,
}

/// Full analysis of one pull request's change set
///
/// Built once per pipeline run and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub files: Vec<ChangedFile>,
    pub summary: ChangeSummary,
    pub issues: Vec<Issue>,
}
