//! # Error Types
//!
//! Fatal, input-level failures. These abort a run before any diagnostic is
//! computed; the CLI turns each into a single synthetic `<file>` line.
//! Content problems inside a well-formed document are never errors, they are
//! [`Diagnostic`](crate::Diagnostic)s.

use thiserror::Error;

/// Message used when the document envelope is not `{ "posts": [ ... ] }`.
pub const SHAPE_MESSAGE: &str =
    r#"Expected top-level object with key "posts": { "posts": [ ... ] }"#;

/// Failure to load or normalize a posts document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON at line {line}, col {column}: {reason}")]
    InvalidJson {
        /// One-based line of the failure.
        line: usize,
        /// Column of the failure as reported by the parser.
        column: usize,
        /// Parser description without the location suffix.
        reason: String,
    },

    /// The file is not valid YAML.
    #[error("Invalid YAML at line {line}, col {column}: {reason}")]
    InvalidYaml {
        /// One-based line of the failure (0 when the parser gave no location).
        line: usize,
        /// Column of the failure (0 when the parser gave no location).
        column: usize,
        /// Parser description without the location suffix.
        reason: String,
    },

    /// YAML parsed but has no JSON equivalent (e.g. non-scalar keys).
    #[error("YAML-to-JSON conversion failed: {0}")]
    YamlConversion(String),

    /// The top level is not an object with a `posts` sequence.
    #[error("{}", SHAPE_MESSAGE)]
    InvalidShape,
}

impl DocumentError {
    pub(crate) fn from_json(err: &serde_json::Error) -> Self {
        DocumentError::InvalidJson {
            line: err.line(),
            column: err.column(),
            reason: strip_location(&err.to_string()),
        }
    }

    pub(crate) fn from_yaml(err: &serde_yaml::Error) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((0, 0));
        DocumentError::InvalidYaml {
            line,
            column,
            reason: strip_location(&err.to_string()),
        }
    }
}

/// Drop the trailing " at line L column C" that serde parsers append.
fn strip_location(message: &str) -> String {
    match message.find(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
