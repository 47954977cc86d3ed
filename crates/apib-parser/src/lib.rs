//! # apib-parser — Blueprint Parsing
//!
//! Turns API Blueprint source text into an [`apib_core::Document`] plus the
//! warnings found along the way. The linter only sees the
//! [`BlueprintParser`] trait, so a different backend can be swapped in
//! without touching validation.
//!
//! ## Built-in Backend
//!
//! [`MarkdownParser`] is a line-oriented parser for the part of API
//! Blueprint the linter needs: metadata, the API name, groups, resources,
//! actions, and request/response messages with their headers, body and
//! schema assets. Descriptions, parameters, attributes and models are
//! skipped. It reports structural problems as warning diagnostics and a
//! small set of unrecoverable inputs as a hard [`ParseFailure`].

mod lines;
mod markdown;
mod signature;

use apib_core::{Diagnostic, Document};
use thiserror::Error;

pub use markdown::MarkdownParser;

/// Message of the hard error raised for tab characters.
pub const TAB_ERROR: &str =
    "the use of tab(s) '\\t' in source data isn't currently supported, please contact makers";

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// A missing `# <API Name>` heading is a hard error instead of a warning.
    pub require_blueprint_name: bool,
}

/// A successfully parsed document and its warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// The document tree. A backend may return no tree; callers treat that
    /// as a document without examples.
    pub document: Option<Document>,
    /// Warnings in source order.
    pub warnings: Vec<Diagnostic>,
}

/// The source could not be parsed at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .error.message)]
pub struct ParseFailure {
    /// The error diagnostic, located in the source.
    pub error: Diagnostic,
}

/// A blueprint parser backend.
pub trait BlueprintParser: Send + Sync {
    /// Parse `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] when the document cannot be parsed; all
    /// recoverable problems are returned as warnings in [`Parsed`].
    fn parse(&self, source: &str, options: &ParseOptions) -> Result<Parsed, ParseFailure>;
}
