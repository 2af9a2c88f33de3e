//! Error types for field validation
//!
//! Two classes of error exist:
//! - `ValidationError`: a field value violated one of its rules. Exactly one is reported per
//!   `validate` call (first failure wins).
//! - `FieldCheckError`: the crate-wide error. Wraps a `ValidationError` or reports a structural
//!   failure (bad format pattern, non-record input, mismatched value list, decode failure).

use std::fmt;

use thiserror::Error;

/// A numeric bound taken from a rule token, kept in the width it was compared at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Integer or wide-integer literal
    Int(i64),
    /// Floating-point literal
    Float(f64),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Int(n) => write!(f, "{}", n),
            Bound::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<i32> for Bound {
    fn from(n: i32) -> Self {
        Bound::Int(i64::from(n))
    }
}

impl From<i64> for Bound {
    fn from(n: i64) -> Self {
        Bound::Int(n)
    }
}

impl From<f64> for Bound {
    fn from(x: f64) -> Self {
        Bound::Float(x)
    }
}

/// A single rule violation on a single field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be more than {bound}")]
    MustBeMore { field: String, bound: Bound },

    #[error("{field} must be less than {bound}")]
    MustBeLess { field: String, bound: Bound },

    #[error("{field} must be equal {bound}")]
    MustBeEqual { field: String, bound: Bound },

    #[error("{field} must not be equal {bound}")]
    MustNotBeEqual { field: String, bound: Bound },

    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} is too short")]
    LenTooShort { field: String },

    #[error("{field} is too long")]
    LenTooLong { field: String },

    #[error("{field} must be {len} characters long")]
    LenMustBe { field: String, len: usize },

    #[error("{field} has invalid format")]
    InvalidFormat { field: String },
}

impl ValidationError {
    /// Returns the stable error code for this violation
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MustBeMore { .. } => "RULE_MUST_BE_MORE",
            ValidationError::MustBeLess { .. } => "RULE_MUST_BE_LESS",
            ValidationError::MustBeEqual { .. } => "RULE_MUST_BE_EQUAL",
            ValidationError::MustNotBeEqual { .. } => "RULE_MUST_NOT_BE_EQUAL",
            ValidationError::Required { .. } => "RULE_REQUIRED",
            ValidationError::LenTooShort { .. } => "RULE_LEN_TOO_SHORT",
            ValidationError::LenTooLong { .. } => "RULE_LEN_TOO_LONG",
            ValidationError::LenMustBe { .. } => "RULE_LEN_MUST_BE",
            ValidationError::InvalidFormat { .. } => "RULE_INVALID_FORMAT",
        }
    }

    /// Returns the (lowercased) name of the offending field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MustBeMore { field, .. }
            | ValidationError::MustBeLess { field, .. }
            | ValidationError::MustBeEqual { field, .. }
            | ValidationError::MustNotBeEqual { field, .. }
            | ValidationError::Required { field }
            | ValidationError::LenTooShort { field }
            | ValidationError::LenTooLong { field }
            | ValidationError::LenMustBe { field, .. }
            | ValidationError::InvalidFormat { field } => field,
        }
    }

    /// Returns the numeric bound for comparison violations
    pub fn bound(&self) -> Option<Bound> {
        match self {
            ValidationError::MustBeMore { bound, .. }
            | ValidationError::MustBeLess { bound, .. }
            | ValidationError::MustBeEqual { bound, .. }
            | ValidationError::MustNotBeEqual { bound, .. } => Some(*bound),
            _ => None,
        }
    }
}

/// Crate-wide error: a rule violation or a structural failure.
#[derive(Debug, Error)]
pub enum FieldCheckError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("field '{field}': invalid format pattern '{pattern}': {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("expected a record (JSON object), got {found}")]
    NotARecord { found: &'static str },

    #[error("value count mismatch: validator has {expected} fields, got {actual} values")]
    ValueCountMismatch { expected: usize, actual: usize },

    #[error("field '{field}': expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("layout '{path}': {reason}")]
    Layout { path: String, reason: String },
}

impl FieldCheckError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FieldCheckError::Validation(e) => e.code(),
            FieldCheckError::InvalidPattern { .. } => "CHECK_INVALID_PATTERN",
            FieldCheckError::NotARecord { .. } => "CHECK_NOT_A_RECORD",
            FieldCheckError::ValueCountMismatch { .. } => "CHECK_VALUE_COUNT_MISMATCH",
            FieldCheckError::TypeMismatch { .. } => "CHECK_TYPE_MISMATCH",
            FieldCheckError::Decode(_) => "CHECK_DECODE_FAILED",
            FieldCheckError::Layout { .. } => "CHECK_LAYOUT_INVALID",
        }
    }

    /// Whether this is a rule violation rather than a structural failure
    pub fn is_violation(&self) -> bool {
        matches!(self, FieldCheckError::Validation(_))
    }

    /// Returns the rule violation, if this is one
    pub fn violation(&self) -> Option<&ValidationError> {
        match self {
            FieldCheckError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for validation operations
pub type FieldCheckResult<T> = Result<T, FieldCheckError>;
