//! # apib-lint — Example Validation Engine
//!
//! Lints API Blueprint documents: every JSON request and response example
//! must be valid JSON, and every JSON Schema attached to one must itself be
//! a valid schema.
//!
//! ## Flow
//!
//! ```text
//! source ──parse──▶ Document + warnings
//!                      │
//!                  walk::examples ──▶ ExampleContext*
//!                      │
//!              example::validate_example ──▶ ValidationFailure*
//!                      │
//!               FileReport (LintIssue*) ──▶ RunOutcome ──▶ exit status
//! ```
//!
//! - [`walk`] flattens the document tree into examples in document order.
//! - [`content_type`] decides which messages carry JSON.
//! - [`example`] runs the syntax and schema checks on one example.
//! - [`report`] and [`issue`] hold per-file results and their rendering.
//! - [`pipeline`] drives one file or a whole run; [`input`] turns the user's
//!   input into file paths.
//!
//! ## Crate Policy
//!
//! - Per-file problems are data ([`LintIssue`]), never `Err`. Only input
//!   resolution returns an error.
//! - Output text is a pure function of the inputs and options.
//! - No `.unwrap()` outside tests.

pub mod content_type;
pub mod example;
pub mod input;
pub mod issue;
pub mod options;
pub mod pipeline;
pub mod report;
pub mod walk;

pub use content_type::is_json_content_type;
pub use example::{
    validate_example, MessageField, MessageKind, ValidationFailure, ValidationOptions,
};
pub use input::{is_glob, resolve_inputs, Input, InputError};
pub use issue::LintIssue;
pub use options::LintOptions;
pub use pipeline::{lint_file, lint_source, Linter};
pub use report::{FileReport, RunOutcome};
pub use walk::{examples, ExampleContext};
