//! # Document Loading
//!
//! Reads a posts file from disk, parses it into a [`serde_json::Value`] and
//! normalizes it to the list of post records.
//!
//! JSON is the primary format. Files with a `.yaml` / `.yml` extension are
//! parsed as YAML and converted into the same JSON value tree, so both the
//! schema pass and the semantic rules only ever see JSON values.

use std::path::Path;

use serde_json::Value;

use crate::error::DocumentError;

/// On-disk format of a posts file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension; anything that is not
    /// `.yaml` / `.yml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Read and parse the posts file at `path`.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read, or a parse
/// error carrying line/column information if it is not valid JSON/YAML.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, bytes = content.len(), "read posts file");
    parse_document(&content, format)
}

/// Parse document text in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| DocumentError::from_json(&e))
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| DocumentError::from_yaml(&e))?;
            yaml_to_json_value(&yaml).map_err(DocumentError::YamlConversion)
        }
    }
}

/// Return the `posts` sequence of a document.
///
/// # Errors
///
/// [`DocumentError::InvalidShape`] unless the document is an object whose
/// `posts` key holds an array.
pub fn normalize_posts(document: &Value) -> Result<&[Value], DocumentError> {
    document
        .as_object()
        .and_then(|obj| obj.get("posts"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or(DocumentError::InvalidShape)
}

/// Convert a `serde_yaml::Value` into the equivalent `serde_json::Value`.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        // Tags carry no meaning for posts files.
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
