//! Untyped YAML documents.
//!
//! Manifests, notes and the registry are read as raw [`serde_yaml::Value`]
//! trees. Validators pattern-match on the shape they expect and report a
//! structural diagnostic on any mismatch, so nothing here assumes a schema.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_yaml::Value;

use crate::lint::{LintDiagnostic, RuleId};

/// Failure to obtain a document tree from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file does not exist.
    NotFound,
    /// The file exists but cannot be read.
    Unreadable(String),
    /// The file is not valid YAML.
    Syntax(String),
}

impl LoadError {
    /// Convert into a diagnostic for the given repository-relative file.
    pub fn into_diagnostic(self, file: &str) -> LintDiagnostic {
        match self {
            LoadError::NotFound => LintDiagnostic::new(RuleId::NotFound, file, "File not found"),
            LoadError::Unreadable(message) => LintDiagnostic::new(
                RuleId::MalformedDocument,
                file,
                format!("Error reading file: {}", message),
            ),
            LoadError::Syntax(message) => LintDiagnostic::new(
                RuleId::MalformedDocument,
                file,
                format!("YAML syntax error: {}", message),
            ),
        }
    }
}

/// Read and parse a YAML file.
///
/// The file is read as UTF-8 so non-ASCII text survives intact. An empty
/// file yields [`Value::Null`].
pub fn load(path: &Path) -> Result<Value, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Unreadable(e.to_string()),
    })?;
    parse(&content)
}

/// Parse YAML text into an untyped tree.
pub fn parse(content: &str) -> Result<Value, LoadError> {
    serde_yaml::from_str(content).map_err(|e| LoadError::Syntax(e.to_string()))
}

/// Short description of a value's shape, for diagnostics.
pub fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Render a scalar for inclusion in a message (`'NL'`, `42`, `null`).
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s),
        Value::Tagged(tagged) => describe(&tagged.value),
        other => shape_name(other).to_string(),
    }
}

/// Look up a string key in a mapping.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_mapping().and_then(|m| m.get(key))
}
