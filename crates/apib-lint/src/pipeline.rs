//! # Lint Pipeline
//!
//! Drives files end to end: read, parse, report parser diagnostics, walk
//! the examples and validate them. [`lint_source`] does the work for one
//! in-memory source and is pure. [`Linter`] runs it for every input file
//! on its own Tokio task and reduces the reports into a [`RunOutcome`].
//!
//! Tasks share the parser, the schema validator and the options through
//! `Arc`s and own everything else. A task that panics is reported as an
//! aborted file; the run itself always completes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use apib_core::line_number;
use apib_parser::BlueprintParser;
use apib_schema::SchemaValidator;

use crate::example::{validate_example, MessageField};
use crate::input::{resolve_inputs, Input, InputError};
use crate::issue::LintIssue;
use crate::options::LintOptions;
use crate::report::{FileReport, RunOutcome};
use crate::walk;

/// Lints one source text. `path` is only used for labelling.
pub fn lint_source(
    path: &str,
    source: &str,
    parser: &dyn BlueprintParser,
    validator: &SchemaValidator,
    options: &LintOptions,
) -> FileReport {
    let mut report = FileReport::new(path);

    let parsed = match parser.parse(source, &options.parse_options()) {
        Ok(parsed) => parsed,
        Err(failure) => {
            report.issues.push(LintIssue::ParseError {
                line: line_number(source, failure.error.offset),
                message: failure.error.message,
            });
            tracing::debug!(path, "parse failed");
            return report;
        }
    };

    for warning in parsed.warnings {
        if !options.require_blueprint_name && warning.is_missing_api_name() {
            continue;
        }
        report.issues.push(LintIssue::ParseWarning {
            line: line_number(source, warning.offset),
            message: warning.message,
        });
    }

    let validation = options.validation();
    for context in walk::examples(parsed.document.as_ref()) {
        for failure in validate_example(&context, &validation, validator) {
            report.issues.push(match failure.field {
                MessageField::Body => LintIssue::JsonSyntax(failure),
                MessageField::Schema => LintIssue::SchemaViolation(failure),
            });
        }
    }

    tracing::debug!(path, issues = report.issues.len(), "linted file");
    report.document = parsed.document;
    report
}

/// Reads and lints one file. Read errors become an [`LintIssue::Io`].
pub async fn lint_file(
    path: PathBuf,
    parser: Arc<dyn BlueprintParser>,
    validator: Arc<SchemaValidator>,
    options: LintOptions,
) -> FileReport {
    let shown = path.display().to_string();
    match tokio::fs::read_to_string(&path).await {
        Ok(source) => lint_source(&shown, &source, parser.as_ref(), &validator, &options),
        Err(err) => {
            tracing::debug!(path = %shown, error = %err, "read failed");
            let mut report = FileReport::new(shown.clone());
            report.issues.push(LintIssue::Io {
                path: shown,
                message: err.to_string(),
            });
            report
        }
    }
}

/// Shared state for a lint run.
#[derive(Clone)]
pub struct Linter {
    parser: Arc<dyn BlueprintParser>,
    validator: Arc<SchemaValidator>,
    options: LintOptions,
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Linter {
    pub fn new(
        parser: Arc<dyn BlueprintParser>,
        validator: Arc<SchemaValidator>,
        options: LintOptions,
    ) -> Self {
        Self {
            parser,
            validator,
            options,
        }
    }

    /// Lints `input`, resolving globs against `root`.
    ///
    /// Glob runs never require an API name and tag validation failures
    /// with the file they came from. A glob without matches is a
    /// successful, empty run.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the glob pattern or the `.gitignore`
    /// under `root` is invalid. Per-file problems are never errors; they
    /// are in the returned outcome.
    pub async fn lint_input(&self, input: &Input, root: &Path) -> Result<RunOutcome, InputError> {
        match input {
            Input::File(path) => Ok(self.run(vec![path.clone()], self.options, false).await),
            Input::Glob(pattern) => {
                let paths = resolve_inputs(pattern, root)?;
                if paths.is_empty() {
                    tracing::warn!(pattern = %pattern, "no files match the pattern");
                }
                Ok(self.run(paths, self.options.for_glob(), true).await)
            }
        }
    }

    /// Lints `paths` concurrently. Reports come back in the order of
    /// `paths`.
    pub async fn run(
        &self,
        paths: Vec<PathBuf>,
        options: LintOptions,
        multi_file: bool,
    ) -> RunOutcome {
        let tasks: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let shown = path.display().to_string();
                let task = tokio::spawn(lint_file(
                    path,
                    Arc::clone(&self.parser),
                    Arc::clone(&self.validator),
                    options,
                ));
                (shown, task)
            })
            .collect();

        let mut outcome = RunOutcome::new(multi_file);
        for (path, task) in tasks {
            let report = match task.await {
                Ok(report) => report,
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "lint task failed");
                    let mut report = FileReport::new(path);
                    report.issues.push(LintIssue::Aborted {
                        message: err.to_string(),
                    });
                    report
                }
            };
            outcome.record(report, options.fail_on_warnings);
        }

        tracing::info!(
            files = outcome.reports.len(),
            failed = outcome.failed.len(),
            "lint run finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apib_core::{Diagnostic, DiagnosticCode};
    use apib_parser::{MarkdownParser, ParseFailure, ParseOptions, Parsed};

    const BAD_RESPONSE: &str = "# Messages

## GET /message

+ Response 200 (application/json)

        not json
";

    fn lint(source: &str, options: LintOptions) -> FileReport {
        let validator = SchemaValidator::new().unwrap();
        lint_source("test.apib", source, &MarkdownParser::new(), &validator, &options)
    }

    #[test]
    fn bad_response_body_fails_the_file() {
        let report = lint(BAD_RESPONSE, LintOptions::default());
        assert_eq!(report.issues.len(), 1);
        let failure = report.issues[0].failure().unwrap();
        assert_eq!(failure.location, "in resource \"/message\"");
        assert!(failure.message.contains("Parse error on line 1"));
        assert!(report.failed(false));
    }

    #[test]
    fn disabled_responses_are_not_checked() {
        let options = LintOptions {
            validate_responses: false,
            ..LintOptions::default()
        };
        assert!(lint(BAD_RESPONSE, options).issues.is_empty());
    }

    #[test]
    fn missing_name_warning_is_suppressed() {
        let report = lint("## GET /a\n+ Response 204\n", LintOptions::default());
        assert!(report.issues.is_empty());
        assert!(!report.failed(true));
    }

    #[test]
    fn missing_name_is_fatal_when_required() {
        let options = LintOptions {
            require_blueprint_name: true,
            ..LintOptions::default()
        };
        let report = lint("\n\n## GET /a\n+ Response 204\n", options);
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            &report.issues[0],
            LintIssue::ParseError { line: 1, message } if message.starts_with("expected API name")
        ));
        assert!(report.document.is_none());
    }

    #[test]
    fn parse_error_stops_the_file() {
        let source = "# API\n## GET /a\n+ Response 200 (application/json)\n\n\tnot json\n";
        let report = lint(source, LintOptions::default());
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(report.issues[0], LintIssue::ParseError { line: 5, .. }));
        assert_eq!(
            report.render(false),
            format!("(test.apib) Error: {} on line 5\n", apib_parser::TAB_ERROR)
        );
    }

    #[test]
    fn warnings_carry_their_line() {
        let report = lint("# API\n\n## GET /a\n\n+ Response 2000\n", LintOptions::default());
        assert_eq!(
            report.render(false),
            "(test.apib) Warning: invalid HTTP status code '2000' on line 5\n"
        );
        assert!(!report.failed(false));
        assert!(report.failed(true));
    }

    #[test]
    fn shallow_response_body_is_still_checked() {
        let source = "# API\n\n## GET /a\n\n+ Response 200 (application/json)\n\n    not json\n";
        let report = lint(source, LintOptions::default());
        assert_eq!(report.issues.len(), 2);
        assert!(matches!(report.issues[0], LintIssue::ParseWarning { line: 7, .. }));
        assert!(matches!(report.issues[1], LintIssue::JsonSyntax(_)));
        assert!(report.failed(false));
    }

    #[test]
    fn no_examples_and_no_warnings_passes_strict_mode() {
        let options = LintOptions {
            fail_on_warnings: true,
            ..LintOptions::default()
        };
        let report = lint("# API\n\nJust prose.\n", options);
        assert!(report.issues.is_empty());
        assert!(!report.failed(true));
    }

    #[test]
    fn rendering_is_idempotent() {
        let first = lint(BAD_RESPONSE, LintOptions::default()).render(false);
        let second = lint(BAD_RESPONSE, LintOptions::default()).render(false);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    struct TreelessParser;

    impl BlueprintParser for TreelessParser {
        fn parse(&self, _source: &str, _options: &ParseOptions) -> Result<Parsed, ParseFailure> {
            Ok(Parsed {
                document: None,
                warnings: vec![Diagnostic::warning(DiagnosticCode::Syntax, 3, 1, "odd")],
            })
        }
    }

    #[test]
    fn absent_tree_reports_only_warnings() {
        let validator = SchemaValidator::new().unwrap();
        let report = lint_source(
            "x.apib",
            "ab\ncd",
            &TreelessParser,
            &validator,
            &LintOptions::default(),
        );
        assert_eq!(
            report.issues,
            vec![LintIssue::ParseWarning {
                line: 2,
                message: "odd".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn unreadable_file_is_an_io_issue() {
        let linter = Linter::new(
            Arc::new(MarkdownParser::new()),
            Arc::new(SchemaValidator::new().unwrap()),
            LintOptions::default(),
        );
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.apib");
        let outcome = linter
            .lint_input(&Input::File(missing.clone()), dir.path())
            .await
            .unwrap();
        assert!(!outcome.is_success());
        let text = outcome.render();
        assert!(text.starts_with(&format!("Could not open {}: ", missing.display())));
    }
}
