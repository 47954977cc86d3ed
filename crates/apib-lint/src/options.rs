//! Run options.

use apib_parser::ParseOptions;

use crate::example::ValidationOptions;

/// Options for a lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    /// Check JSON requests.
    pub validate_requests: bool,
    /// Check JSON responses.
    pub validate_responses: bool,
    /// Surviving parser warnings fail the file.
    pub fail_on_warnings: bool,
    /// A missing API name is a hard parse error. Ignored for glob input.
    pub require_blueprint_name: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            validate_requests: true,
            validate_responses: true,
            fail_on_warnings: false,
            require_blueprint_name: false,
        }
    }
}

impl LintOptions {
    pub fn validation(&self) -> ValidationOptions {
        ValidationOptions {
            validate_requests: self.validate_requests,
            validate_responses: self.validate_responses,
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            require_blueprint_name: self.require_blueprint_name,
        }
    }

    /// The options as they apply to a multi-file run.
    pub fn for_glob(self) -> Self {
        Self {
            require_blueprint_name: false,
            ..self
        }
    }
}
