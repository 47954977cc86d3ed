//! # Per-File Reports and Run Outcomes
//!
//! A [`FileReport`] holds everything one input produced, in the order it
//! was found. Rendering is a pure function of the report, so linting the
//! same file twice gives byte-identical text.
//!
//! Layout of a rendered report:
//!
//! ```text
//! (notes.apib) Warning: action is missing a response on line 12
//! Error in JSON response in resource "/notes", action "List"
//!     Parse error on line 1:
//!     ...
//!
//! Error in JSON request in resource "/notes", action "Create"
//!     ...
//! ```
//!
//! Parser diagnostics always carry the `(<file>) ` tag and read errors name
//! the file in their message. Validation failures are tagged only in
//! multi-file runs.

use apib_core::Document;

use crate::issue::LintIssue;

/// Result of linting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub issues: Vec<LintIssue>,
    /// The parsed document, when the parser produced one.
    pub document: Option<Document>,
}

impl FileReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            issues: Vec::new(),
            document: None,
        }
    }

    /// Parser warnings that made it into the report.
    pub fn surviving_warnings(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, LintIssue::ParseWarning { .. }))
            .count()
    }

    /// Whether this file fails the run.
    pub fn failed(&self, fail_on_warnings: bool) -> bool {
        self.issues.iter().any(LintIssue::is_fatal)
            || (fail_on_warnings && self.surviving_warnings() > 0)
    }

    /// The report text. Empty when there is nothing to say.
    pub fn render(&self, tagged: bool) -> String {
        let mut out = String::new();
        let mut wrote_failure = false;
        for issue in &self.issues {
            match issue {
                LintIssue::ParseError { .. }
                | LintIssue::ParseWarning { .. }
                | LintIssue::Aborted { .. } => {
                    out.push_str(&format!("({}) {issue}\n", self.path));
                }
                LintIssue::Io { .. } => out.push_str(&format!("{issue}\n")),
                LintIssue::JsonSyntax(_) | LintIssue::SchemaViolation(_) => {
                    if wrote_failure {
                        out.push('\n');
                    }
                    if tagged {
                        out.push_str(&format!("({}) ", self.path));
                    }
                    out.push_str(&format!("{issue}\n"));
                    wrote_failure = true;
                }
            }
        }
        out
    }
}

/// Reduction of every file report of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOutcome {
    pub reports: Vec<FileReport>,
    /// Paths of the files that failed, in input order.
    pub failed: Vec<String>,
    /// The run came from a glob; validation failures are file-tagged.
    pub multi_file: bool,
}

impl RunOutcome {
    pub fn new(multi_file: bool) -> Self {
        Self {
            multi_file,
            ..Self::default()
        }
    }

    /// Adds one file's report. Failure only ever accumulates.
    pub fn record(&mut self, report: FileReport, fail_on_warnings: bool) {
        if report.failed(fail_on_warnings) {
            self.failed.push(report.path.clone());
        }
        self.reports.push(report);
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Process exit status: `0` when every file passed, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// All reports in input order.
    pub fn render(&self) -> String {
        self.reports
            .iter()
            .map(|r| r.render(self.multi_file))
            .collect()
    }
}
