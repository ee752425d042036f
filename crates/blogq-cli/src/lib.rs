//! # blogq-cli — Command-Line Interface for blogq
//!
//! Provides the `blogq` binary.
//!
//! ## Subcommands
//!
//! - `blogq check <path>` — validate a posts file; exit 1 on any error.
//! - `blogq rules` — list the semantic rules in reporting order.
//!
//! ```bash
//! blogq check data/posts.json
//! blogq check data/posts.yaml --format json
//! blogq check data/posts.json --schema schemas/posts.schema.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in one module per
//!   subcommand and return an exit code.
//! - Diagnostics go to stdout, logs go to stderr.
//! - Fatal input errors are rendered as diagnostics, never returned.

pub mod check;
pub mod rules;
