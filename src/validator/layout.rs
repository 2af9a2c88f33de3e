//! JSON record layouts
//!
//! A layout declares a record's fields for JSON input: name, kind and rule text, in declaration
//! order. Layouts are plain JSON documents:
//!
//! ```json
//! {
//!   "type_name": "User",
//!   "fields": [
//!     { "name": "Age", "kind": "int", "rules": ">0;<150" },
//!     { "name": "Email", "kind": "text", "rules": "required;format=email" }
//!   ]
//! }
//! ```
//!
//! Extraction from a JSON document:
//! - Input must be a JSON object (`NotARecord` otherwise)
//! - Missing or null members take the zero value of their kind
//! - Members of the wrong JSON type fail with `TypeMismatch`
//! - Undeclared members are ignored

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::engine::Validator;
use super::errors::{FieldCheckError, FieldCheckResult};
use super::types::{FieldDescriptor, FieldValue};

/// Declared kind of a layout field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// 32-bit integer
    Int,
    /// 64-bit integer
    WideInt,
    /// 64-bit float
    Float,
    /// UTF-8 text
    Text,
    /// Anything else; never evaluated
    Other,
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::WideInt => "wide_int",
            FieldKind::Float => "float",
            FieldKind::Text => "text",
            FieldKind::Other => "other",
        }
    }

    /// Value a missing member takes
    pub fn zero_value(&self) -> FieldValue {
        match self {
            FieldKind::Int => FieldValue::Integer(0),
            FieldKind::WideInt => FieldValue::WideInteger(0),
            FieldKind::Float => FieldValue::Float(0.0),
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Other => FieldValue::Unsupported,
        }
    }
}

/// One declared field of a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// `;`-separated rule text; absent means no rules
    #[serde(default)]
    pub rules: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind, rules: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            rules: rules.into(),
        }
    }
}

/// Ordered field declarations for a JSON record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLayout {
    pub type_name: String,
    pub fields: Vec<FieldSpec>,
}

impl RecordLayout {
    /// Create a layout
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Parses a layout from JSON text.
    pub fn from_json_str(text: &str) -> FieldCheckResult<Self> {
        Self::parse("<in-memory>", text)
    }

    /// Loads a layout file.
    pub fn load(path: &Path) -> FieldCheckResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| FieldCheckError::Layout {
            path: path.display().to_string(),
            reason: format!("Failed to read file: {}", e),
        })?;

        let layout = Self::parse(&path.display().to_string(), &content)?;

        debug!(
            path = %path.display(),
            record = %layout.type_name,
            fields = layout.fields.len(),
            "loaded record layout"
        );

        Ok(layout)
    }

    /// Parses layout JSON, attributing errors to `origin`.
    fn parse(origin: &str, text: &str) -> FieldCheckResult<Self> {
        serde_json::from_str(text).map_err(|e| FieldCheckError::Layout {
            path: origin.to_string(),
            reason: format!("Invalid JSON: {}", e),
        })
    }

    /// Extracts descriptors from a JSON document, in layout order.
    pub fn descriptors(&self, document: &Value) -> FieldCheckResult<Vec<FieldDescriptor>> {
        let obj = as_record(document)?;

        self.fields
            .iter()
            .map(|spec| -> FieldCheckResult<FieldDescriptor> {
                Ok(FieldDescriptor {
                    name: spec.name.clone(),
                    value: extract_value(spec, obj)?,
                    rule_text: spec.rules.clone(),
                })
            })
            .collect()
    }

    /// Extracts only the values from a JSON document, in layout order.
    pub fn values(&self, document: &Value) -> FieldCheckResult<Vec<FieldValue>> {
        let obj = as_record(document)?;
        self.fields
            .iter()
            .map(|spec| extract_value(spec, obj))
            .collect()
    }

    /// Builds a validator for a JSON document.
    pub fn validator(&self, document: &Value) -> FieldCheckResult<Validator> {
        Ok(Validator::new(
            self.type_name.clone(),
            self.descriptors(document)?,
        ))
    }

    /// Builds a validator holding zero values, ready for `add_values`.
    pub fn empty_validator(&self) -> Validator {
        let fields = self
            .fields
            .iter()
            .map(|spec| FieldDescriptor {
                name: spec.name.clone(),
                value: spec.kind.zero_value(),
                rule_text: spec.rules.clone(),
            })
            .collect();
        Validator::new(self.type_name.clone(), fields)
    }
}

fn as_record(document: &Value) -> FieldCheckResult<&Map<String, Value>> {
    document.as_object().ok_or(FieldCheckError::NotARecord {
        found: json_type_name(document),
    })
}

fn extract_value(spec: &FieldSpec, obj: &Map<String, Value>) -> FieldCheckResult<FieldValue> {
    let value = match obj.get(&spec.name) {
        Some(value) if !value.is_null() => value,
        _ => return Ok(spec.kind.zero_value()),
    };

    let extracted = match spec.kind {
        FieldKind::Int => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(FieldValue::Integer),
        FieldKind::WideInt => value.as_i64().map(FieldValue::WideInteger),
        // Integers are acceptable floats
        FieldKind::Float => value.as_f64().map(FieldValue::Float),
        FieldKind::Text => value.as_str().map(|s| FieldValue::Text(s.to_string())),
        FieldKind::Other => Some(FieldValue::Unsupported),
    };

    extracted.ok_or_else(|| FieldCheckError::TypeMismatch {
        field: spec.name.clone(),
        expected: spec.kind.type_name(),
        found: json_type_name(value),
    })
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
