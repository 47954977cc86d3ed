//! # Parser Diagnostics
//!
//! Warnings and errors a blueprint parser reports against the source text.
//! A diagnostic locates itself by character offset; turning that into a
//! line number is the job of [`crate::position::line_number`], done only
//! when a diagnostic is printed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message prefix of the missing API name diagnostic.
pub const EXPECTED_API_NAME: &str = "expected API name";

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document could not be parsed.
    Error,
    /// The document parsed, but something looks wrong.
    Warning,
}

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// The document has no `# <API Name>` heading.
    ApiName,
    /// Source text the parser cannot process at all.
    Syntax,
    /// A construct outside the place it is allowed in; skipped.
    Ignoring,
    /// A section that should carry content is empty.
    EmptyDefinition,
    /// A resource or action declared twice.
    Duplicate,
    /// Asset content not indented as a pre-formatted block.
    Indentation,
    /// Malformed HTTP detail: status code, method, header line.
    Http,
    /// An action with no response.
    Logical,
}

/// One parser finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based character offset into the source.
    pub offset: usize,
    /// Length in characters of the offending span.
    pub length: usize,
    /// Whether the finding stops parsing.
    pub severity: Severity,
    /// What kind of problem was found.
    pub code: DiagnosticCode,
    /// Human-readable description, without severity or location.
    pub message: String,
}

impl Diagnostic {
    /// A finding the parser recovered from.
    pub fn warning(
        code: DiagnosticCode,
        offset: usize,
        length: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            offset,
            length,
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// A finding that stops the parse.
    pub fn error(
        code: DiagnosticCode,
        offset: usize,
        length: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            offset,
            length,
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    /// Whether this is the "document has no API name" diagnostic.
    ///
    /// Matches on the message as well as the code so diagnostics coming from
    /// other parser backends are recognized too.
    pub fn is_missing_api_name(&self) -> bool {
        self.code == DiagnosticCode::ApiName || self.message.contains(EXPECTED_API_NAME)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("Error"),
            Self::Warning => f.write_str("Warning"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}
