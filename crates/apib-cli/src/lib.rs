//! # apib-cli — The `apib-lint` Command
//!
//! ```bash
//! apib-lint api.apib
//! apib-lint 'docs/**/*.apib' --fail-on-warnings
//! apib-lint api.apib --config apib-lint.yaml --print-ast > ast.json
//! ```
//!
//! ## Exit Status
//!
//! - `0`: every file passed.
//! - `1`: a file failed. It did not parse, could not be read, holds invalid
//!   JSON or an invalid schema, or has parser warnings under
//!   `--fail-on-warnings`.
//! - `2`: the run could not start, e.g. a bad config file or glob pattern.

pub mod config;
pub mod lint;

/// Exit status for errors that prevent linting altogether.
pub const EXIT_OPERATIONAL: u8 = 2;
