//! # Schema Validation
//!
//! Structural validation of a parsed posts document against the bundled
//! JSON Schema (Draft 2020-12), with string formats such as `date-time`
//! and `uri` asserted rather than treated as annotations.
//!
//! ## First Violation Only
//!
//! [`StructuralValidator::violations`] returns every violation the backend
//! finds, but [`schema_diagnostics`] reports only the first one, while the
//! semantic rules report everything. Keep this asymmetry unless exhaustive
//! structural reporting is explicitly wanted.
//!
//! ## Schema Resolution
//!
//! The schema is self-contained: internal `$ref`s of the form
//! `#/$defs/<name>` are resolved by the jsonschema crate natively. Any other
//! `$ref` is refused by a local retriever so validation never touches the
//! network; a schema that needs one fails to build.

use std::fmt;
use std::path::{Path, PathBuf};

use blogq_core::{Diagnostic, ROOT_POINTER, SCHEMA_SLUG};
use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// File name of the bundled schema.
pub const BUNDLED_SCHEMA_NAME: &str = "posts.schema.json";

/// The bundled posts schema, versioned with this crate.
pub const BUNDLED_SCHEMA: &str = include_str!("../schemas/posts.schema.json");

/// Retriever that refuses every external `$ref`.
struct LocalOnlyRetriever;

impl Retrieve for LocalOnlyRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external $ref is not allowed: {}", uri.as_str()).into())
    }
}

/// The schema itself could not be loaded or compiled.
///
/// Always fatal for a run: a broken schema is a configuration problem, not
/// a finding about the posts file.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema could not be read or is not JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema is JSON but not a valid JSON Schema.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single structural violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value; empty at the document root.
    pub instance_path: String,
    /// JSON Pointer within the schema to the failing keyword.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// The instance path, or `<root>` when the violation is at the root.
    pub fn pointer(&self) -> &str {
        if self.instance_path.is_empty() {
            ROOT_POINTER
        } else {
            &self.instance_path
        }
    }

    /// The `<schema>` diagnostic for this violation.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(SCHEMA_SLUG, self.pointer(), self.message.clone())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pointer(), self.message)
    }
}

/// Anything that can check a whole document and report structural violations.
pub trait StructuralValidator {
    /// All violations in document order; empty when the document conforms.
    fn violations(&self, instance: &Value) -> Vec<Violation>;
}

/// A compiled posts schema backed by the `jsonschema` crate.
pub struct SchemaValidator {
    schema_name: String,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile the schema bundled with this crate.
    pub fn bundled() -> Result<Self, SchemaValidationError> {
        Self::from_json_str(BUNDLED_SCHEMA_NAME, BUNDLED_SCHEMA)
    }

    /// Read and compile a schema file.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::SchemaLoadError`] if the file cannot be read
    /// or is not JSON; [`SchemaValidationError::ValidatorBuildError`] if it
    /// is not a usable JSON Schema.
    pub fn from_file(path: &Path) -> Result<Self, SchemaValidationError> {
        let name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: name.clone(),
                reason: format!("cannot read schema file: {e}"),
            }
        })?;
        Self::from_json_str(&name, &content)
    }

    /// Parse and compile schema text.
    pub fn from_json_str(schema_name: &str, content: &str) -> Result<Self, SchemaValidationError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
        Self::from_value(schema_name, &value)
    }

    /// Compile an already-parsed schema.
    pub fn from_value(schema_name: &str, schema: &Value) -> Result<Self, SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(true);
        opts.with_retriever(LocalOnlyRetriever);

        let validator =
            opts.build(schema)
                .map_err(|e| SchemaValidationError::ValidatorBuildError {
                    schema_name: schema_name.to_string(),
                    reason: e.to_string(),
                })?;
        tracing::debug!(schema = schema_name, "compiled posts schema");
        Ok(Self {
            schema_name: schema_name.to_string(),
            validator,
        })
    }

    /// Name the schema was loaded under.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }
}

impl StructuralValidator for SchemaValidator {
    fn violations(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}

/// Where the schema for a run comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SchemaSource {
    /// The schema compiled into this crate.
    #[default]
    Bundled,
    /// A schema file on disk.
    File(PathBuf),
}

impl SchemaSource {
    /// Load and compile the schema. Called once per run.
    pub fn load(&self) -> Result<SchemaValidator, SchemaValidationError> {
        match self {
            SchemaSource::Bundled => SchemaValidator::bundled(),
            SchemaSource::File(path) => SchemaValidator::from_file(path),
        }
    }
}

/// Structural diagnostics for a document: zero or one `<schema>` error.
pub fn schema_diagnostics<V>(validator: &V, instance: &Value) -> Vec<Diagnostic>
where
    V: StructuralValidator + ?Sized,
{
    let violations = validator.violations(instance);
    if violations.len() > 1 {
        tracing::debug!(
            total = violations.len(),
            "reporting first structural violation only"
        );
    }
    violations
        .first()
        .map(Violation::to_diagnostic)
        .into_iter()
        .collect()
}
