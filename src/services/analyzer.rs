//! Code Analyzer
//!
//! Scans unified diffs for risk patterns and aggregates per-file results
//! into one `AnalysisReport`. Detection is deliberately line-pattern
//! based; there is no semantic or AST-level analysis here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{AnalysisReport, ChangeSummary, ChangedFile, Issue, IssueCategory, IssueKind};

/// Patterns flagging likely security problems on an added line.
///
/// A match emits one error-kind, security-category issue with severity 8.
static SECURITY_PATTERNS: &[&str] = &[
    r"(?i)console\.log.*password",
    r"(?i)console\.log.*token",
    r"(?i)console\.log.*secret",
    r"eval\s*\(",
    r"document\.write\s*\(",
    r"innerHTML\s*=",
    r"\.exec\s*\(",
];

/// Patterns flagging code-quality smells on an added line.
///
/// A match emits one warning-kind, best-practice issue with severity 5.
static QUALITY_PATTERNS: &[&str] = &[
    // Long lines
    r".{120,}",
    // Work markers
    r"(?i)TODO|FIXME|HACK",
    // Debug print left in production code
    r"console\.log",
    // Loosely-typed variable with an unused-looking assignment
    r"var\s+\w+\s*=.*;\s*$",
];

static COMPILED_SECURITY: Lazy<Vec<Regex>> = Lazy::new(|| {
    SECURITY_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("SECURITY_PATTERNS: invalid regex"))
        .collect()
});

static COMPILED_QUALITY: Lazy<Vec<Regex>> = Lazy::new(|| {
    QUALITY_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("QUALITY_PATTERNS: invalid regex"))
        .collect()
});

/// Hunk header, e.g. `@@ -10,5 +20,5 @@`. Capture 1 is the new-file start.
static HUNK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@@ -\d+,?\d* \+(\d+),?\d* @@").expect("HUNK_HEADER: invalid regex"));

const SECURITY_SEVERITY: u8 = 8;
const QUALITY_SEVERITY: u8 = 5;

/// Static analyzer over a pull request's changed files.
#[derive(Debug, Default)]
pub struct CodeAnalyzer;

impl CodeAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate the change set into a single report.
    ///
    /// Totals are plain sums over the platform-reported per-file counts;
    /// they are not recomputed from the patches. Files and issues keep
    /// input order.
    pub fn analyze(&self, files: Vec<ChangedFile>) -> AnalysisReport {
        let mut issues = Vec::new();
        let mut languages: Vec<String> = Vec::new();

        for file in &files {
            if let Some(patch) = &file.patch {
                issues.extend(scan_patch(&file.filename, patch));
            }
            if let Some(language) = detect_language(&file.filename) {
                if !languages.iter().any(|l| l == language) {
                    languages.push(language.to_string());
                }
            }
        }

        let summary = ChangeSummary {
            total_files: files.len(),
            total_additions: files.iter().map(|f| f.additions).sum(),
            total_deletions: files.iter().map(|f| f.deletions).sum(),
            languages,
        };

        AnalysisReport {
            files,
            summary,
            issues,
        }
    }
}

/// Scan one unified-diff patch for added-line issues.
///
/// Pure and total: performs no I/O, never fails, worst case returns an
/// empty list. Line numbers are resolved from the hunk headers; a header
/// whose offset does not parse leaves the running counter unchanged and
/// the scan continues best-effort.
pub fn scan_patch(filename: &str, patch: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut current_line: u32 = 0;

    for line in patch.lines() {
        if line.starts_with("@@") {
            if let Some(captures) = HUNK_HEADER.captures(line) {
                if let Ok(start) = captures[1].parse::<u32>() {
                    current_line = start.saturating_sub(1);
                }
            }
            continue;
        }

        if line.starts_with('+') && !line.starts_with("+++") {
            current_line += 1;
            let content = &line[1..];

            if COMPILED_SECURITY.iter().any(|p| p.is_match(content)) {
                issues.push(Issue {
                    kind: IssueKind::Error,
                    category: IssueCategory::Security,
                    message: "Potential security vulnerability detected".to_string(),
                    file: filename.to_string(),
                    line: Some(current_line),
                    column: None,
                    severity: SECURITY_SEVERITY,
                });
            }

            if COMPILED_QUALITY.iter().any(|p| p.is_match(content)) {
                issues.push(Issue {
                    kind: IssueKind::Warning,
                    category: IssueCategory::BestPractice,
                    message: "Code quality issue detected".to_string(),
                    file: filename.to_string(),
                    line: Some(current_line),
                    column: None,
                    severity: QUALITY_SEVERITY,
                });
            }
        }
        // Removed and context lines do not advance the new-file counter
    }

    issues
}

/// Map a filename extension to a display language.
///
/// Unmapped or missing extensions yield `None` and contribute nothing to
/// the detected-language set.
pub fn detect_language(filename: &str) -> Option<&'static str> {
    let extension = filename.rsplit('.').next()?.to_ascii_lowercase();
    let language = match extension.as_str() {
        "js" => "JavaScript",
        "jsx" => "React",
        "ts" => "TypeScript",
        "tsx" => "React TypeScript",
        "py" => "Python",
        "java" => "Java",
        "cpp" => "C++",
        "c" => "C",
        "cs" => "C#",
        "go" => "Go",
        "rs" => "Rust",
        "php" => "PHP",
        "rb" => "Ruby",
        _ => return None,
    };
    Some(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileStatus;

    fn file(name: &str, patch: Option<&str>) -> ChangedFile {
        ChangedFile {
            filename: name.to_string(),
            status: FileStatus::Modified,
            additions: 3,
            deletions: 1,
            changes: 4,
            patch: patch.map(|p| p.to_string()),
        }
    }

    #[test]
    fn no_added_lines_no_issues() {
        let patch = "@@ -1,3 +1,3 @@\n context\n-removed\n another context";
        assert!(scan_patch("app.ts", patch).is_empty());
    }

    #[test]
    fn missing_patch_yields_no_issues() {
        let report = CodeAnalyzer::new().analyze(vec![file("image.png", None)]);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn hunk_header_resolves_added_line_numbers() {
        let patch = "@@ -10,5 +20,5 @@\n+let a = 1\n+let b = 2\n+let c = 3";
        // None of the lines match a pattern, so force one that does per line
        let patch = patch.replace("let", "console.log(password_");
        let issues = scan_patch("app.ts", &patch);

        let lines: Vec<u32> = issues
            .iter()
            .filter(|i| i.category == IssueCategory::Security)
            .map(|i| i.line.unwrap())
            .collect();
        assert_eq!(lines, vec![20, 21, 22]);
    }

    #[test]
    fn context_and_removed_lines_do_not_advance_counter() {
        let patch = "@@ -1,4 +5,4 @@\n context\n-gone\n+console.log(token)\n more context";
        let issues = scan_patch("app.js", patch);

        assert_eq!(issues.len(), 2); // security + debug-print quality
        assert_eq!(issues[0].line, Some(5));
    }

    #[test]
    fn password_logging_is_a_security_error() {
        let patch = "@@ -1,1 +1,1 @@\n+CONSOLE.LOG(Password)";
        let issues = scan_patch("whatever.xyz", patch);

        let security: Vec<_> = issues
            .iter()
            .filter(|i| i.category == IssueCategory::Security)
            .collect();
        assert_eq!(security.len(), 1);
        assert_eq!(security[0].kind, IssueKind::Error);
        assert_eq!(security[0].severity, 8);
        assert_eq!(security[0].file, "whatever.xyz");
    }

    #[test]
    fn one_line_can_match_both_pattern_sets() {
        // console.log(secret) is a security hit and a debug-print quality hit
        let patch = "@@ -1,1 +1,1 @@\n+console.log(secret)";
        let issues = scan_patch("a.js", patch);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, 8);
        assert_eq!(issues[1].severity, 5);
        assert_eq!(issues[0].line, issues[1].line);
    }

    #[test]
    fn long_line_and_todo_are_quality_warnings() {
        let long = format!("+{}", "x".repeat(130));
        let patch = format!("@@ -1,2 +1,2 @@\n{long}\n+// TODO: revisit");
        let issues = scan_patch("a.rs", &patch);

        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == 5));
        assert!(issues.iter().all(|i| i.kind == IssueKind::Warning));
    }

    #[test]
    fn file_marker_line_is_not_scanned() {
        let patch = "+++ b/console.log(password).js\n@@ -1,1 +1,1 @@\n+fine line";
        assert!(scan_patch("a.js", patch).is_empty());
    }

    #[test]
    fn malformed_hunk_header_degrades_without_resetting() {
        // First hunk positions the counter; the malformed second header is
        // a no-op, so the following added line continues from where the
        // counter stopped. Accepted imprecision, pinned on purpose.
        let patch = "@@ -1,1 +7,1 @@\n+console.log(token)\n@@ broken header @@\n+console.log(secret)";
        let issues = scan_patch("a.js", patch);

        let security_lines: Vec<u32> = issues
            .iter()
            .filter(|i| i.category == IssueCategory::Security)
            .map(|i| i.line.unwrap())
            .collect();
        assert_eq!(security_lines, vec![7, 8]);
    }

    #[test]
    fn aggregates_totals_and_languages() {
        let files = vec![
            file("src/app.ts", Some("@@ -1,1 +1,1 @@\n+console.log(password)")),
            file("src/util.ts", None),
            file("script.py", None),
            file("README", None),
        ];
        let report = CodeAnalyzer::new().analyze(files);

        assert_eq!(report.summary.total_files, 4);
        assert_eq!(report.summary.total_additions, 12);
        assert_eq!(report.summary.total_deletions, 4);
        assert_eq!(report.summary.languages, vec!["TypeScript", "Python"]);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.files.len(), 4);
    }

    #[test]
    fn unmapped_extension_contributes_no_language() {
        assert_eq!(detect_language("Makefile"), None);
        assert_eq!(detect_language("archive.tar.gz"), None);
        assert_eq!(detect_language("main.RS"), Some("Rust"));
    }
}
