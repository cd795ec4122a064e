//! Review Response Parser
//!
//! Line-oriented state machine over the review service's free-text
//! reply. Total: every malformed construct has a defined default or
//! ignore behavior, so any input string (including empty) parses to a
//! fully-formed `ReviewResult`.

use crate::models::{CommentKind, CommentPriority, ReviewComment, ReviewResult};

/// Score used when the reply carries no parseable `OVERALL_SCORE:` line.
const DEFAULT_SCORE: u8 = 75;

/// Summary used when the reply carries no summary section.
const DEFAULT_SUMMARY: &str = "Code review completed.";

/// Section the parser is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Summary,
    Recommendations,
    Comments,
}

/// Comment under construction.
///
/// Replaced wholesale on each `FILE:` line and cleared on flush; the
/// type/priority fields stay raw strings until flush, where unrecognized
/// values coerce to their defaults.
#[derive(Debug, Default)]
struct PendingComment {
    file: String,
    line: Option<u32>,
    body: Option<String>,
    kind_raw: Option<String>,
    priority_raw: Option<String>,
}

impl PendingComment {
    fn new(file: &str) -> Self {
        Self {
            file: file.trim().to_string(),
            ..Self::default()
        }
    }

    /// Materialize into a `ReviewComment`, or `None` when file or body
    /// is missing/empty.
    fn into_comment(self) -> Option<ReviewComment> {
        let body = self.body.filter(|b| !b.is_empty())?;
        if self.file.is_empty() {
            return None;
        }
        Some(ReviewComment {
            file: self.file,
            line: self.line,
            body,
            kind: self
                .kind_raw
                .as_deref()
                .map(CommentKind::parse_lenient)
                .unwrap_or_default(),
            priority: self
                .priority_raw
                .as_deref()
                .map(CommentPriority::parse_lenient)
                .unwrap_or_default(),
        })
    }
}

/// Parse the review service reply into a typed result. Never fails.
pub fn parse_review(response: &str) -> ReviewResult {
    let mut overall_score = DEFAULT_SCORE;
    let mut summary = String::new();
    let mut recommendations: Vec<String> = Vec::new();
    let mut comments: Vec<ReviewComment> = Vec::new();

    let mut section = Section::None;
    let mut pending: Option<PendingComment> = None;

    for raw_line in response.lines() {
        let line = raw_line.trim();

        if let Some(rest) = line.strip_prefix("OVERALL_SCORE:") {
            if let Some(score) = first_integer(rest) {
                overall_score = score.min(100) as u8;
            }
        } else if line.starts_with("SUMMARY:") {
            section = Section::Summary;
        } else if line.starts_with("RECOMMENDATIONS:") {
            section = Section::Recommendations;
        } else if line.starts_with("COMMENTS:") {
            section = Section::Comments;
        } else if let Some(rest) = line.strip_prefix("FILE:") {
            if let Some(previous) = pending.take() {
                comments.extend(previous.into_comment());
            }
            pending = Some(PendingComment::new(rest));
        } else if let Some(rest) = line.strip_prefix("LINE:") {
            // Non-numeric line numbers are ignored, not an error
            if let Some(pending) = pending.as_mut() {
                if let Ok(number) = rest.trim().parse::<u32>() {
                    pending.line = Some(number);
                }
            }
        } else if let Some(rest) = line.strip_prefix("TYPE:") {
            if let Some(pending) = pending.as_mut() {
                pending.kind_raw = Some(rest.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("PRIORITY:") {
            if let Some(pending) = pending.as_mut() {
                pending.priority_raw = Some(rest.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("BODY:") {
            if let Some(pending) = pending.as_mut() {
                pending.body = Some(rest.trim().to_string());
            }
        } else if line == "---" {
            if let Some(previous) = pending.take() {
                comments.extend(previous.into_comment());
            }
        } else if !line.is_empty() {
            match section {
                // Only the first non-empty line of the summary counts
                Section::Summary if summary.is_empty() => summary = line.to_string(),
                Section::Recommendations => {
                    if let Some(item) = strip_ordinal(line) {
                        recommendations.push(item.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    // A record still open at end of input is flushed like a `---` would
    if let Some(previous) = pending.take() {
        comments.extend(previous.into_comment());
    }

    ReviewResult {
        overall_score,
        summary: if summary.is_empty() {
            DEFAULT_SUMMARY.to_string()
        } else {
            summary
        },
        recommendations,
        comments,
    }
}

/// First run of ASCII digits in `s`, saturated at `u32::MAX` on overflow.
fn first_integer(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Strip a leading `<digits>.` ordinal marker, returning the remainder.
fn strip_ordinal(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    Some(rest.strip_prefix('.')?.trim_start())
}
