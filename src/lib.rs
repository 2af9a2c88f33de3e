//! fieldcheck - declarative, rule-string driven field validation
//!
//! Fields carry short rule strings (`">0;<150"`, `"required;format=email"`); the engine checks
//! every rule against the field's value and reports the first violation.

pub mod validator;

pub use validator::{
    Decoder, FieldCheckError, FieldCheckResult, FieldDescriptor, FieldKind, FieldSpec,
    FieldValue, Record, RecordLayout, ValidationError, Validator,
};
