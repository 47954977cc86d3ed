//! # Lint Command
//!
//! Resolves options (defaults, then the config file, then flags), runs the
//! linter over the input and writes the report to stderr. With
//! `--print-ast` every parsed document is also written to stdout as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use apib_lint::{Input, LintOptions, Linter, RunOutcome};
use apib_parser::MarkdownParser;
use apib_schema::SchemaValidator;

use crate::config::{ConfigError, LintConfig};

/// Arguments of the lint command.
#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    /// Blueprint file, or a glob pattern such as `docs/**/*.apib`.
    pub input: String,

    /// Do not check request examples.
    #[arg(long)]
    pub no_requests: bool,

    /// Do not check response examples.
    #[arg(long)]
    pub no_responses: bool,

    /// Fail when the parser reports warnings.
    #[arg(long)]
    pub fail_on_warnings: bool,

    /// Treat a missing `# <API Name>` heading as an error. Ignored for globs.
    #[arg(long)]
    pub require_name: bool,

    /// YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the parsed document as JSON to stdout.
    #[arg(long)]
    pub print_ast: bool,
}

impl LintArgs {
    /// The effective options for this invocation.
    pub fn options(&self) -> Result<LintOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => LintConfig::load(path)?.apply(LintOptions::default()),
            None => LintOptions::default(),
        };
        if self.no_requests {
            options.validate_requests = false;
        }
        if self.no_responses {
            options.validate_responses = false;
        }
        if self.fail_on_warnings {
            options.fail_on_warnings = true;
        }
        if self.require_name {
            options.require_blueprint_name = true;
        }
        Ok(options)
    }
}

/// Runs the lint command and returns the process exit status.
pub async fn run_lint(args: &LintArgs, root: &Path) -> Result<u8> {
    let options = args.options()?;
    tracing::debug!(?options, input = %args.input, "starting lint");

    let validator =
        SchemaValidator::new().context("failed to prepare JSON Schema meta-schemas")?;
    let linter = Linter::new(Arc::new(MarkdownParser::new()), Arc::new(validator), options);

    let input = Input::parse(&args.input);
    let outcome = linter
        .lint_input(&input, root)
        .await
        .with_context(|| format!("cannot lint '{}'", args.input))?;

    eprint!("{}", outcome.render());
    if args.print_ast {
        print!("{}", ast_json(&outcome)?);
    }

    Ok(outcome.exit_code())
}

/// Every parsed document of `outcome` as pretty JSON, each followed by a
/// newline, in input order.
pub fn ast_json(outcome: &RunOutcome) -> Result<String> {
    let mut out = String::new();
    for document in outcome.reports.iter().filter_map(|r| r.document.as_ref()) {
        let json = serde_json::to_string_pretty(document).context("failed to serialize AST")?;
        out.push_str(&json);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apib_lint::FileReport;

    fn args(input: &str) -> LintArgs {
        LintArgs {
            input: input.to_string(),
            no_requests: false,
            no_responses: false,
            fail_on_warnings: false,
            require_name: false,
            config: None,
            print_ast: false,
        }
    }

    #[test]
    fn flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("apib-lint.yaml");
        std::fs::write(&config, "validateRequests: true\nfailOnWarnings: false\n").unwrap();

        let options = LintArgs {
            no_requests: true,
            fail_on_warnings: true,
            config: Some(config),
            ..args("api.apib")
        }
        .options()
        .unwrap();

        assert!(!options.validate_requests);
        assert!(options.validate_responses);
        assert!(options.fail_on_warnings);
    }

    #[test]
    fn config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("apib-lint.yaml");
        std::fs::write(&config, "validateResponses: false\n").unwrap();

        let options = LintArgs {
            config: Some(config),
            ..args("api.apib")
        }
        .options()
        .unwrap();
        assert!(!options.validate_responses);
        assert!(options.validate_requests);
    }

    #[test]
    fn ast_json_skips_reports_without_document() {
        let mut outcome = RunOutcome::default();
        outcome.record(FileReport::new("a.apib"), false);
        assert_eq!(ast_json(&outcome).unwrap(), "");
    }
}
