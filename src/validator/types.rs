//! Field descriptors and the value model
//!
//! A record exposes its fields as an ordered list of descriptors, one per declared field:
//! `{name, value, rule_text}`. The value is a closed set of kinds. Each kind selects an evaluator,
//! and `Unsupported` values are never evaluated.

use std::fmt;

/// Runtime value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Narrow (32-bit) signed integer
    Integer(i32),
    /// Wide (64-bit) signed integer
    WideInteger(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Any kind with no rules defined (bool, list, nested record, ...)
    Unsupported,
}

impl FieldValue {
    /// Returns the kind name for messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "int",
            FieldValue::WideInteger(_) => "wide_int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::WideInteger(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::Unsupported => write!(f, "<unsupported>"),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::WideInteger(n)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(_: bool) -> Self {
        FieldValue::Unsupported
    }
}

/// One declared field: name, current value, and its `;`-separated rule text.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value: FieldValue,
    pub rule_text: String,
}

impl FieldDescriptor {
    /// Create a descriptor
    pub fn new(
        name: impl Into<String>,
        value: impl Into<FieldValue>,
        rule_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            rule_text: rule_text.into(),
        }
    }

    /// Create a descriptor for a field that carries no rules
    pub fn unruled(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(name, value, "")
    }

    /// Whether the field declares any rules at all
    pub fn has_rules(&self) -> bool {
        !self.rule_text.is_empty()
    }
}

/// A host record that can enumerate its fields.
///
/// Implementations must return one descriptor per declared field, in declaration order, and
/// must return the same names and rule texts for every instance of the type. Only the values
/// differ between instances.
pub trait Record {
    /// Name of the record type
    fn type_name(&self) -> &'static str;

    /// Declared fields in declaration order
    fn fields(&self) -> Vec<FieldDescriptor>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions_pick_kind() {
        assert_eq!(FieldValue::from(5_i32), FieldValue::Integer(5));
        assert_eq!(FieldValue::from(5_i64), FieldValue::WideInteger(5));
        assert_eq!(FieldValue::from(1.5_f64), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from("x"), FieldValue::Text("x".into()));
        assert_eq!(FieldValue::from(true), FieldValue::Unsupported);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldValue::Integer(0).kind_name(), "int");
        assert_eq!(FieldValue::WideInteger(0).kind_name(), "wide_int");
        assert_eq!(FieldValue::Float(0.0).kind_name(), "float");
        assert_eq!(FieldValue::Text(String::new()).kind_name(), "text");
        assert_eq!(FieldValue::Unsupported.kind_name(), "unsupported");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(FieldValue::Integer(-4).to_string(), "-4");
        assert_eq!(FieldValue::WideInteger(5_000_000_000).to_string(), "5000000000");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Text("a b".into()).to_string(), "\"a b\"");
        assert_eq!(FieldValue::Unsupported.to_string(), "<unsupported>");
    }

    #[test]
    fn test_descriptor_has_rules() {
        assert!(FieldDescriptor::new("Age", 3_i32, ">0").has_rules());
        assert!(!FieldDescriptor::unruled("Age", 3_i32).has_rules());
    }
}
