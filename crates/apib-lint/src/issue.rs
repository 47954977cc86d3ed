//! Everything a file can report.

use std::fmt;

use crate::example::ValidationFailure;

/// One entry of a [`FileReport`](crate::report::FileReport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintIssue {
    /// The parser gave up on the file. Nothing else is reported for it.
    ParseError { line: usize, message: String },
    /// A recoverable parser finding. Fails the file only when warnings
    /// are configured to fail.
    ParseWarning { line: usize, message: String },
    /// A JSON body that does not parse.
    JsonSyntax(ValidationFailure),
    /// A schema that does not parse or does not meta-validate.
    SchemaViolation(ValidationFailure),
    /// The file could not be read.
    Io { path: String, message: String },
    /// The task linting the file died before producing a report.
    Aborted { message: String },
}

impl LintIssue {
    /// Whether this issue fails its file regardless of options.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::ParseWarning { .. } => false,
            Self::ParseError { .. }
            | Self::JsonSyntax(_)
            | Self::SchemaViolation(_)
            | Self::Io { .. }
            | Self::Aborted { .. } => true,
        }
    }

    /// The failure behind a validation issue.
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::JsonSyntax(failure) | Self::SchemaViolation(failure) => Some(failure),
            Self::ParseError { .. }
            | Self::ParseWarning { .. }
            | Self::Io { .. }
            | Self::Aborted { .. } => None,
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError { line, message } => write!(f, "Error: {message} on line {line}"),
            Self::ParseWarning { line, message } => {
                write!(f, "Warning: {message} on line {line}")
            }
            Self::JsonSyntax(failure) | Self::SchemaViolation(failure) => {
                fmt::Display::fmt(failure, f)
            }
            Self::Io { path, message } => write!(f, "Could not open {path}: {message}"),
            Self::Aborted { message } => write!(f, "Error: linting aborted: {message}"),
        }
    }
}
