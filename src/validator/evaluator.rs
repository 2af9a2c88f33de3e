//! Per-kind rule evaluators and the kind dispatcher
//!
//! Every evaluator walks the field's tokens left to right and stops at the first violated one.
//! Tokens without a shape for the field's kind are ignored.

use std::str::FromStr;

use tracing::trace;

use super::errors::{Bound, FieldCheckResult, ValidationError};
use super::formats;
use super::grammar::{self, Comparison, LiteralShape, TextRule};
use super::types::{FieldDescriptor, FieldValue};

/// Evaluates one field against its rules, routing on the value kind.
///
/// `name` is the name reported in errors (already lowercased by the caller). Fields with an
/// empty rule text and fields of unsupported kind always pass.
pub fn evaluate_field(name: &str, field: &FieldDescriptor) -> FieldCheckResult<()> {
    if !field.has_rules() {
        return Ok(());
    }

    trace!(
        field = name,
        kind = field.value.kind_name(),
        value = %field.value,
        rules = %field.rule_text,
        "evaluating field"
    );

    match &field.value {
        FieldValue::Integer(v) => evaluate_int(name, *v, &field.rule_text)?,
        FieldValue::WideInteger(v) => evaluate_wide_int(name, *v, &field.rule_text)?,
        FieldValue::Float(v) => evaluate_float(name, *v, &field.rule_text)?,
        FieldValue::Text(v) => evaluate_text(name, v, &field.rule_text)?,
        FieldValue::Unsupported => {}
    }

    Ok(())
}

/// Evaluates a narrow integer value.
pub fn evaluate_int(name: &str, value: i32, rule_text: &str) -> Result<(), ValidationError> {
    evaluate_numeric(name, value, rule_text, LiteralShape::Digits)
}

/// Evaluates a wide integer value.
pub fn evaluate_wide_int(name: &str, value: i64, rule_text: &str) -> Result<(), ValidationError> {
    evaluate_numeric(name, value, rule_text, LiteralShape::Digits)
}

/// Evaluates a float value. Comparisons are plain IEEE comparisons, no tolerance.
pub fn evaluate_float(name: &str, value: f64, rule_text: &str) -> Result<(), ValidationError> {
    evaluate_numeric(name, value, rule_text, LiteralShape::Decimal)
}

fn evaluate_numeric<T>(
    name: &str,
    value: T,
    rule_text: &str,
    shape: LiteralShape,
) -> Result<(), ValidationError>
where
    T: Copy + PartialOrd + FromStr + Default + Into<Bound>,
{
    for token in grammar::tokens(rule_text) {
        let Some(rule) = grammar::parse_numeric::<T>(token, shape) else {
            continue;
        };

        if rule.op.violated_by(value, rule.bound) {
            return Err(numeric_violation(name, rule.op, rule.bound.into()));
        }
    }

    Ok(())
}

fn numeric_violation(name: &str, op: Comparison, bound: Bound) -> ValidationError {
    let field = name.to_string();
    match op {
        Comparison::More => ValidationError::MustBeMore { field, bound },
        Comparison::Less => ValidationError::MustBeLess { field, bound },
        Comparison::Equal => ValidationError::MustBeEqual { field, bound },
        Comparison::NotEqual => ValidationError::MustNotBeEqual { field, bound },
    }
}

/// Evaluates a text value.
///
/// `required` is checked first, over the whole rule text. Lengths count characters, not bytes.
/// An empty value never fails a format rule.
pub fn evaluate_text(name: &str, value: &str, rule_text: &str) -> FieldCheckResult<()> {
    if grammar::is_required(rule_text) && value.is_empty() {
        return Err(ValidationError::Required {
            field: name.to_string(),
        }
        .into());
    }

    let char_count = value.chars().count();

    for token in grammar::tokens(rule_text) {
        match grammar::parse_text(token) {
            Some(TextRule::Length { op, bound }) => {
                if op.violated_by(char_count, bound) {
                    return Err(length_violation(name, op, bound).into());
                }
            }
            Some(TextRule::Format(arg)) => {
                let pattern = formats::compile(name, arg)?;
                if char_count > 0 && !pattern.is_match(value) {
                    return Err(ValidationError::InvalidFormat {
                        field: name.to_string(),
                    }
                    .into());
                }
            }
            None => {}
        }
    }

    Ok(())
}

fn length_violation(name: &str, op: Comparison, bound: usize) -> ValidationError {
    let field = name.to_string();
    match op {
        Comparison::More => ValidationError::LenTooShort { field },
        Comparison::Less => ValidationError::LenTooLong { field },
        // `len!=N` has no token shape; only `len=N` reaches here.
        Comparison::Equal | Comparison::NotEqual => ValidationError::LenMustBe { field, len: bound },
    }
}
