//! # Example Validator
//!
//! Runs the JSON checks on one walked example. Requests are checked before
//! responses, each in the order they appear. Only messages whose
//! `Content-Type` marks them as JSON are looked at; within such a message
//! the body and the schema are checked independently, and an empty string
//! means "not given" and is never checked.

use std::fmt;

use apib_core::Message;
use apib_schema::{check_json, SchemaValidator};

use crate::content_type::is_json_content_type;
use crate::walk::ExampleContext;

/// Which messages of an example are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub validate_requests: bool,
    pub validate_responses: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            validate_requests: true,
            validate_responses: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Request,
    Response,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Response => f.write_str("response"),
        }
    }
}

/// The part of a message a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageField {
    Body,
    Schema,
}

/// One failed check on one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub kind: MessageKind,
    pub field: MessageField,
    /// Position of the message among the example's requests or responses.
    pub index: usize,
    /// Output of [`ExampleContext::location`].
    pub location: String,
    /// The checker's explanation. May span several lines.
    pub message: String,
}

impl ValidationFailure {
    /// First line of the rendered failure.
    pub fn heading(&self) -> String {
        match self.field {
            MessageField::Body => format!("Error in JSON {} {}", self.kind, self.location),
            MessageField::Schema => {
                format!("Error in JSON schema of {} {}", self.kind, self.location)
            }
        }
    }
}

/// Heading, then the message with every line indented by four spaces.
/// Inner blank lines and carriage returns are kept as they are.
impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.heading())?;
        let message = self.message.strip_suffix('\n').unwrap_or(&self.message);
        if !message.is_empty() {
            write!(f, "\n    {}", message.replace('\n', "\n    "))?;
        }
        Ok(())
    }
}

/// Checks one example and returns its failures in check order.
pub fn validate_example(
    context: &ExampleContext<'_>,
    options: &ValidationOptions,
    validator: &SchemaValidator,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    let mut location = None;

    let groups = [
        (
            MessageKind::Request,
            options.validate_requests,
            &context.example.requests,
        ),
        (
            MessageKind::Response,
            options.validate_responses,
            &context.example.responses,
        ),
    ];

    for (kind, enabled, messages) in groups {
        if !enabled {
            continue;
        }
        for (index, message) in messages.iter().enumerate() {
            for (field, problem) in check_message(message, validator) {
                let label = location.get_or_insert_with(|| context.location());
                failures.push(ValidationFailure {
                    kind,
                    field,
                    index,
                    location: label.clone(),
                    message: problem,
                });
            }
        }
    }

    failures
}

fn check_message(message: &Message, validator: &SchemaValidator) -> Vec<(MessageField, String)> {
    let mut problems = Vec::new();
    if !is_json_content_type(&message.headers) {
        return problems;
    }
    if !message.body.is_empty() {
        if let Err(err) = check_json(&message.body) {
            problems.push((MessageField::Body, err.to_string()));
        }
    }
    if !message.schema.is_empty() {
        if let Err(err) = validator.validate(&message.schema) {
            problems.push((MessageField::Schema, err.to_string()));
        }
    }
    problems
}
