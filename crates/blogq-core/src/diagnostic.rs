//! # Diagnostics
//!
//! A [`Diagnostic`] is one finding reported against a posts file. Both the
//! structural (schema) pass and the semantic rules emit diagnostics, and the
//! CLI renders them one per line.
//!
//! Diagnostics are plain values: they carry no identity beyond their fields
//! and are never mutated after construction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Slug placeholder used for structural (schema) violations.
pub const SCHEMA_SLUG: &str = "<schema>";

/// Slug placeholder used for fatal, file-level failures.
pub const FILE_SLUG: &str = "<file>";

/// Pointer placeholder for violations at the document root.
pub const ROOT_POINTER: &str = "<root>";

/// Severity of a diagnostic. Only [`Severity::Error`] fails a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Policy or structural violation; makes the run exit nonzero.
    Error,
    /// Advisory finding; reported but does not affect the exit code.
    Warn,
}

impl Severity {
    /// The canonical uppercase label (`ERROR` / `WARN`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width/alignment flags like `{:<5}` apply.
        f.pad(self.as_str())
    }
}

/// One reported finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the finding is.
    pub severity: Severity,
    /// Slug of the offending post, or a placeholder such as `<schema>`.
    pub slug: String,
    /// JSON-Pointer-style location (`/posts/3/tags/1`) or a sentinel.
    pub pointer: String,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Build an error-level diagnostic.
    pub fn error(
        slug: impl Into<String>,
        pointer: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            slug: slug.into(),
            pointer: pointer.into(),
            message: message.into(),
        }
    }

    /// Build a warning-level diagnostic.
    pub fn warn(
        slug: impl Into<String>,
        pointer: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warn,
            slug: slug.into(),
            pointer: pointer.into(),
            message: message.into(),
        }
    }

    /// The synthetic diagnostic that stands in for a fatal, file-level error.
    pub fn fatal(path: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::error(FILE_SLUG, path.to_string(), reason.to_string())
    }

    /// Whether this diagnostic fails the run.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<5} {} {}: {}",
            self.severity, self.slug, self.pointer, self.message
        )
    }
}

/// True when any diagnostic in the slice is error-level.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Process exit code for a finished run: 1 if any error, 0 otherwise.
pub fn exit_code(diagnostics: &[Diagnostic]) -> u8 {
    u8::from(has_errors(diagnostics))
}
