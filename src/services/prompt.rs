//! Review Prompt Builder
//!
//! Renders an `AnalysisReport` into the structured request sent to the
//! review service. The instruction block at the end carries the exact
//! section markers the response parser consumes; the surrounding prose
//! is free to change, the marker grammar is not.

use std::fmt::Write;

use crate::models::AnalysisReport;

/// Character budget for each per-file diff excerpt.
const PATCH_EXCERPT_LIMIT: usize = 1000;

/// Marker appended when a diff excerpt exceeds the budget.
const TRUNCATION_MARKER: &str = "...";

/// Render the analysis report into the review request text. Pure.
pub fn build_prompt(report: &AnalysisReport) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an experienced software engineer performing a detailed code review \
         of the following pull request.\n\n",
    );

    let _ = writeln!(prompt, "## Pull request overview");
    let _ = writeln!(prompt, "- Files changed: {}", report.summary.total_files);
    let _ = writeln!(prompt, "- Lines added: {}", report.summary.total_additions);
    let _ = writeln!(prompt, "- Lines deleted: {}", report.summary.total_deletions);
    let _ = writeln!(
        prompt,
        "- Main languages: {}",
        report.summary.languages.join(", ")
    );

    prompt.push_str("\n## Changed files\n");
    for file in &report.files {
        let _ = writeln!(prompt, "\n### {} ({})", file.filename, file.status.as_str());
        let _ = writeln!(
            prompt,
            "- Added: {} lines, deleted: {} lines",
            file.additions, file.deletions
        );
        if let Some(patch) = &file.patch {
            let _ = writeln!(prompt, "```diff\n{}\n```", excerpt(patch));
        }
    }

    prompt.push_str("\n## Detected issues\n");
    for issue in &report.issues {
        let location = match issue.line {
            Some(line) => format!("{}:{}", issue.file, line),
            None => issue.file.clone(),
        };
        let _ = writeln!(
            prompt,
            "- [{}/10] {}: {} ({})",
            issue.severity,
            issue.category.as_str(),
            issue.message,
            location
        );
    }

    prompt.push_str(INSTRUCTION_BLOCK);
    prompt
}

/// Truncate a diff to the excerpt budget, marking the cut explicitly.
fn excerpt(patch: &str) -> String {
    if patch.chars().count() <= PATCH_EXCERPT_LIMIT {
        return patch.to_string();
    }
    let truncated: String = patch.chars().take(PATCH_EXCERPT_LIMIT).collect();
    format!("{truncated}{TRUNCATION_MARKER}")
}

/// Fixed instruction block. The section markers here are load-bearing:
/// they must match what the response parser expects, byte for byte.
const INSTRUCTION_BLOCK: &str = r#"
## Requested response format
Provide your review in exactly this format:

OVERALL_SCORE: [number between 0 and 100]

SUMMARY:
[concise assessment of the pull request as a whole]

RECOMMENDATIONS:
1. [recommendation]
2. [recommendation]
3. [recommendation]

COMMENTS:
[each comment in this form]
FILE: [file path]
LINE: [line number, if applicable]
TYPE: [suggestion|improvement|issue|praise]
PRIORITY: [low|medium|high]
BODY: [the concrete comment]
---

## Review focus
Evaluate the change from these angles:
1. Security: leaked credentials, injection sinks, unsafe evaluation
2. Performance: algorithmic efficiency, avoidable allocations
3. Readability: clarity and naming
4. Maintainability: modularity and testability
5. Best practices: language idioms and design patterns

## Scoring bands
- 90-100: excellent, only minor polish suggestions
- 80-89: good quality with a few improvements
- 70-79: acceptable but needs meaningful improvement
- 60-69: several problems, review required
- 0-59: significant problems, substantial rework needed

Give constructive, specific feedback and include concrete improvement suggestions.
"#;
