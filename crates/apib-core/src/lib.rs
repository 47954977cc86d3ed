#![deny(missing_docs)]
//! # apib-core — Foundational Types for apib-lint
//!
//! Defines the parsed API Blueprint document tree, the diagnostics a parser
//! attaches to it, and the mapping from source offsets to line numbers.
//! Every other crate in the workspace depends on `apib-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **The document is read-only.** A [`Document`] is produced once per
//!    input file by a parser and never mutated afterwards. Validators borrow
//!    it; nothing holds it across files.
//!
//! 2. **Absent is not empty.** Optional names are `Option<String>`. Bodies and
//!    schemas are plain strings where the empty string means "not given".
//!
//! 3. **Offsets are characters.** [`Diagnostic::offset`] counts Unicode scalar
//!    values, not bytes, and [`line_number`] resolves it the same way.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `apib-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public model types implement `Serialize`/`Deserialize`.
//! - Every public item is documented (`#![deny(missing_docs)]`).

pub mod diagnostic;
pub mod model;
pub mod position;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use model::{Action, Document, Example, Header, Message, Metadata, Resource, ResourceGroup};
pub use position::line_number;
