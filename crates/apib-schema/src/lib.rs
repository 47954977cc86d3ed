//! # apib-schema — Payload and Schema Checks
//!
//! The two checks the linter runs on every JSON-bearing blueprint message.
//!
//! ## Syntax (`json`)
//!
//! [`check_json`] parses a body or schema string with `serde_json` and, on
//! failure, returns a [`JsonSyntaxError`] that renders the offending source
//! line with a caret under the error column.
//!
//! ## Schemas (`validate`)
//!
//! [`SchemaValidator::validate`] parses a schema string and meta-validates
//! it with the `jsonschema` crate, reporting every violation with the
//! offending value, its path inside the schema, and an explanation.
//!
//! ## Crate Policy
//!
//! - Depends on no `apib-*` crate; works on plain strings and JSON values.
//! - Checks never panic on user input; every problem is returned as data.

pub mod json;
pub mod validate;

pub use json::{check_json, JsonSyntaxError};
pub use validate::{SchemaError, SchemaValidator, ValidationViolations, Violation};
