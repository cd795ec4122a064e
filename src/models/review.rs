//! Review result models
//!
//! Typed output of the review-response parser. `CommentKind` and
//! `CommentPriority` accept arbitrary free text from the model reply and
//! coerce anything unrecognized to a default at flush time.

use serde::{Deserialize, Serialize};

/// Kind of review comment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    #[default]
    Suggestion,
    Improvement,
    Issue,
    Praise,
}

impl CommentKind {
    /// Lenient parse: unrecognized input falls back to `Suggestion`
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "improvement" => Self::Improvement,
            "issue" => Self::Issue,
            "praise" => Self::Praise,
            "suggestion" => Self::Suggestion,
            _ => Self::Suggestion,
        }
    }
}

/// Priority of a review comment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl CommentPriority {
    /// Lenient parse: unrecognized input falls back to `Medium`
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Medium,
        }
    }
}

/// One comment extracted from the model reply
///
/// Only materialized when both `file` and `body` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub body: String,
    pub kind: CommentKind,
    pub priority: CommentPriority,
}

/// Complete parsed review
///
/// Always fully formed: the parser supplies defaults for every missing
/// section, so this is never partially constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    /// 0-100
    pub overall_score: u8,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub comments: Vec<ReviewComment>,
}
