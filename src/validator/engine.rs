//! Validator: runs every field's rules in declaration order
//!
//! Validation semantics:
//! - Fields are checked in the order they were captured
//! - Field names are lowercased before they appear in errors
//! - The first violation ends the run and is the whole report
//! - Validation never mutates the validator
//!
//! A validator built from one record can be refilled with fresh values through `add_values`
//! and validated again. Names and rule texts are kept; only values change.

use tracing::debug;

use super::errors::{FieldCheckError, FieldCheckResult};
use super::evaluator::evaluate_field;
use super::types::{FieldDescriptor, FieldValue, Record};

/// Holds a record's field layout and current values.
#[derive(Debug, Clone)]
pub struct Validator {
    type_name: String,
    fields: Vec<FieldDescriptor>,
}

impl Validator {
    /// Creates a validator from explicit descriptors.
    pub fn new(type_name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Creates a validator from a record's declared fields.
    pub fn from_record<R: Record + ?Sized>(record: &R) -> Self {
        Self::new(record.type_name(), record.fields())
    }

    /// Returns the record type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the captured fields
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates every field against its rules.
    ///
    /// # Errors
    ///
    /// Returns the first violation as `FieldCheckError::Validation`, or
    /// `FieldCheckError::InvalidPattern` if a `format=` pattern does not compile.
    pub fn validate(&self) -> FieldCheckResult<()> {
        for field in &self.fields {
            let name = field.name.to_lowercase();

            if let Err(err) = evaluate_field(&name, field) {
                debug!(
                    record = %self.type_name,
                    field = %name,
                    code = err.code(),
                    "validation failed"
                );
                return Err(err);
            }
        }

        Ok(())
    }

    /// Replaces field values positionally.
    ///
    /// # Errors
    ///
    /// Returns `FieldCheckError::ValueCountMismatch` if `values` does not hold exactly one
    /// value per field. The validator is left unchanged in that case.
    pub fn add_values(&mut self, values: Vec<FieldValue>) -> FieldCheckResult<()> {
        if values.len() != self.fields.len() {
            return Err(FieldCheckError::ValueCountMismatch {
                expected: self.fields.len(),
                actual: values.len(),
            });
        }

        for (field, value) in self.fields.iter_mut().zip(values) {
            field.value = value;
        }

        Ok(())
    }

    /// Replaces field values with those of another instance of the record.
    pub fn add_record_values<R: Record + ?Sized>(&mut self, record: &R) -> FieldCheckResult<()> {
        let values = record.fields().into_iter().map(|f| f.value).collect();
        self.add_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::errors::{Bound, ValidationError};

    struct User {
        age: i32,
        email: String,
    }

    impl Record for User {
        fn type_name(&self) -> &'static str {
            "User"
        }

        fn fields(&self) -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("Age", self.age, ">0;<150"),
                FieldDescriptor::new("Email", self.email.as_str(), "required;format=email"),
            ]
        }
    }

    fn user(age: i32, email: &str) -> User {
        User {
            age,
            email: email.into(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        let validator = Validator::from_record(&user(30, "a@b.com"));
        assert_eq!(validator.type_name(), "User");
        assert_eq!(validator.len(), 2);
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_reports_lowercased_name() {
        let validator = Validator::from_record(&user(200, "a@b.com"));
        let err = validator.validate().unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&ValidationError::MustBeLess {
                field: "age".into(),
                bound: Bound::Int(150)
            })
        );
    }

    #[test]
    fn test_first_failing_field_wins() {
        let validator = Validator::from_record(&user(0, ""));
        let err = validator.validate().unwrap_err();
        assert_eq!(err.code(), "RULE_MUST_BE_MORE");
    }

    #[test]
    fn test_add_values_revalidates() {
        let mut validator = Validator::from_record(&user(30, "a@b.com"));

        validator
            .add_values(vec![FieldValue::Integer(30), FieldValue::Text(String::new())])
            .unwrap();
        let err = validator.validate().unwrap_err();
        assert_eq!(err.code(), "RULE_REQUIRED");
        assert_eq!(err.violation().unwrap().field(), "email");

        validator.add_record_values(&user(30, "a@b.com")).unwrap();
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_add_values_keeps_names_and_rules() {
        let mut validator = Validator::from_record(&user(30, "a@b.com"));
        validator
            .add_values(vec![FieldValue::Integer(1), FieldValue::from("x@y.org")])
            .unwrap();

        assert_eq!(validator.fields()[0].name, "Age");
        assert_eq!(validator.fields()[0].rule_text, ">0;<150");
        assert_eq!(validator.fields()[1].value, FieldValue::Text("x@y.org".into()));
    }

    #[test]
    fn test_add_values_count_mismatch() {
        let mut validator = Validator::from_record(&user(30, "a@b.com"));
        let err = validator
            .add_values(vec![FieldValue::Integer(500)])
            .unwrap_err();

        assert!(matches!(
            err,
            FieldCheckError::ValueCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
        // Unchanged on error
        assert_eq!(validator.fields()[0].value, FieldValue::Integer(30));
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_empty_validator_passes() {
        let validator = Validator::new("Empty", Vec::new());
        assert!(validator.is_empty());
        assert!(validator.validate().is_ok());
    }
}
