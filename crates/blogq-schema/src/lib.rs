//! # blogq-schema — Structural Validation of Posts Documents
//!
//! Validates a parsed posts document against the JSON Schema bundled in
//! `schemas/posts.schema.json` and reports the result as blogq diagnostics.
//!
//! ## Runtime Validation (`validate`)
//!
//! - [`SchemaValidator`] compiles a schema with the `jsonschema` crate
//!   (Draft 2020-12, formats asserted, no network retrieval).
//! - [`StructuralValidator`] is the capability the pipeline depends on:
//!   a document in, a list of path + message violations out.
//! - [`schema_diagnostics`] turns the first violation into a single
//!   `<schema>` error diagnostic.
//!
//! ## Crate Policy
//!
//! - Depends only on `blogq-core` internally.
//! - A schema that cannot be loaded or compiled is a
//!   [`SchemaValidationError`], never a diagnostic.
//! - The bundled schema is versioned with the crate; changes to required
//!   fields or formats are breaking changes for existing posts files.

pub mod validate;

pub use validate::{
    schema_diagnostics, SchemaSource, SchemaValidationError, SchemaValidator,
    StructuralValidator, Violation, BUNDLED_SCHEMA, BUNDLED_SCHEMA_NAME,
};
