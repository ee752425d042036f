//! # blogq-core — Diagnostics and Semantic Rules for Blog Post Data
//!
//! Foundational crate of the blogq workspace. It defines the diagnostic
//! record every check reports, loads and normalizes posts documents, and
//! hosts the semantic rule registry.
//!
//! ## Two Tiers of Failure
//!
//! 1. **Diagnostics** describe problems in the content of a well-formed
//!    document. They accumulate and never abort a run.
//! 2. **[`DocumentError`]s** describe input that cannot be checked at all
//!    (unreadable, unparseable, or not `{ "posts": [ ... ] }`). They abort
//!    the run before any diagnostic is computed.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `blogq-*` crates.
//! - Semantic rules never panic on malformed post records; every field
//!   access goes through the [`Post`] safe-default accessors.
//! - No `.unwrap()` outside tests.

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod post;
pub mod semantic;

pub use diagnostic::{
    exit_code, has_errors, Diagnostic, Severity, FILE_SLUG, ROOT_POINTER, SCHEMA_SLUG,
};
pub use document::{load_document, normalize_posts, parse_document, DocumentFormat};
pub use error::{DocumentError, SHAPE_MESSAGE};
pub use post::Post;
pub use semantic::{
    is_valid_slug, semantic_diagnostics, RuleMetadata, RuleRegistry, SemanticRule, SLUG_PATTERN,
};
