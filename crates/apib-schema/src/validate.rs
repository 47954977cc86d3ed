//! # Schema Validation
//!
//! Checks that a schema attached to a blueprint message is itself a valid
//! JSON Schema document. Bodies are never validated against the schema;
//! only the schema is checked, in two stages:
//!
//! 1. The schema text must parse as JSON. A syntax error stops here.
//! 2. A non-empty JSON object is meta-validated against the JSON Schema
//!    meta-schema, collecting every violation.
//!
//! An empty object, or a JSON value that is not an object, is accepted
//! without meta-validation: an empty schema is not an error.
//!
//! ## Draft Selection
//!
//! | `$schema` mentions     | Meta-schema                  |
//! |------------------------|------------------------------|
//! | `draft/2020-12`        | Draft 2020-12 (`jsonschema`) |
//! | `draft/2019-09`        | Draft 2019-09 (`jsonschema`) |
//! | `draft-07`, `draft-06` | Draft 7 (bundled)            |
//! | anything else, or none | Draft 4 (bundled)            |
//!
//! Draft 4 is what blueprint schemas conventionally declare. The bundled
//! meta-schemas are compiled once per [`SchemaValidator`]; the newer drafts
//! use the meta-validators `jsonschema` keeps for itself.

use std::fmt;

use jsonschema::{Draft, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::json::{check_json, JsonSyntaxError};

const DRAFT4_META_SCHEMA: &str = include_str!("../schemas/draft-04.schema.json");
const DRAFT7_META_SCHEMA: &str = include_str!("../schemas/draft-07.schema.json");

/// Error from checking a schema string.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema text is not well-formed JSON.
    #[error("{0}")]
    Syntax(#[from] JsonSyntaxError),

    /// The schema parsed but breaks the meta-schema.
    #[error("{0}")]
    Invalid(ValidationViolations),

    /// A bundled meta-schema could not be compiled.
    #[error("meta-schema '{draft}' could not be compiled: {reason}")]
    MetaSchema {
        /// Which bundled meta-schema failed.
        draft: &'static str,
        /// Reason reported by the compiler.
        reason: String,
    },
}

/// A single meta-schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending value, serialized as JSON.
    pub value: String,
    /// JSON Pointer to the offending value inside the checked schema.
    pub path: String,
    /// Human-readable description of the broken constraint.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(
            f,
            "value: {}\npath: {path}\nerror: {}",
            self.value, self.message
        )
    }
}

/// Every violation found in one schema, in the order the validator reported them.
/// Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Meta-validator for schemas embedded in blueprint messages.
///
/// Compiled meta-schemas are immutable, so one `SchemaValidator` can be
/// shared by every file of a run.
pub struct SchemaValidator {
    draft4: Validator,
    draft7: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile the bundled Draft 4 and Draft 7 meta-schemas.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MetaSchema` if a bundled meta-schema does not
    /// parse or compile.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            draft4: compile_meta_schema("draft-04", DRAFT4_META_SCHEMA, Draft::Draft4)?,
            draft7: compile_meta_schema("draft-07", DRAFT7_META_SCHEMA, Draft::Draft7)?,
        })
    }

    /// Check a schema string.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Syntax` if the text is not JSON, or
    /// `SchemaError::Invalid` listing every meta-schema violation.
    pub fn validate(&self, schema: &str) -> Result<(), SchemaError> {
        let value = check_json(schema)?;
        self.validate_value(&value).map_err(SchemaError::Invalid)
    }

    /// Meta-validate an already parsed schema.
    ///
    /// Empty objects and non-objects pass without inspection.
    pub fn validate_value(&self, schema: &Value) -> Result<(), ValidationViolations> {
        match schema.as_object() {
            Some(object) if !object.is_empty() => {}
            _ => return Ok(()),
        }

        let violations: Vec<Violation> = self
            .meta_validator_for(schema)
            .iter_errors(schema)
            .map(|e| Violation {
                value: e.instance.to_string(),
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations { violations })
        }
    }

    fn meta_validator_for(&self, schema: &Value) -> &Validator {
        match schema.get("$schema").and_then(Value::as_str) {
            Some(uri) if uri.contains("draft/2020-12") => {
                &*jsonschema::draft202012::meta::VALIDATOR
            }
            Some(uri) if uri.contains("draft/2019-09") => {
                &*jsonschema::draft201909::meta::VALIDATOR
            }
            Some(uri) if uri.contains("draft-07") || uri.contains("draft-06") => &self.draft7,
            _ => &self.draft4,
        }
    }
}

fn compile_meta_schema(
    draft_name: &'static str,
    source: &str,
    draft: Draft,
) -> Result<Validator, SchemaError> {
    let meta: Value = serde_json::from_str(source).map_err(|e| SchemaError::MetaSchema {
        draft: draft_name,
        reason: e.to_string(),
    })?;

    jsonschema::options()
        .with_draft(draft)
        .build(&meta)
        .map_err(|e| SchemaError::MetaSchema {
            draft: draft_name,
            reason: e.to_string(),
        })
}
