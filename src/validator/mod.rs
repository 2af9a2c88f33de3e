//! Field validation subsystem
//!
//! Records declare their fields as `{name, value, rule_text}` descriptors. Each rule text is a
//! `;`-separated list of constraint tokens checked against the field's runtime value.
//!
//! # Design Principles
//!
//! - First failure wins: one violation per run, no accumulation
//! - Tokens run left to right, no reordering or deduplication
//! - Kind-based dispatch over a closed value enum
//! - Unsupported kinds and empty rule texts always pass
//! - No normalization or coercion of values
//! - Validation is pure and deterministic

mod decode;
mod engine;
mod errors;
mod evaluator;
pub mod formats;
pub mod grammar;
mod layout;
mod types;

pub use decode::Decoder;
pub use engine::Validator;
pub use errors::{Bound, FieldCheckError, FieldCheckResult, ValidationError};
pub use evaluator::{evaluate_field, evaluate_float, evaluate_int, evaluate_text, evaluate_wide_int};
pub use layout::{FieldKind, FieldSpec, RecordLayout};
pub use types::{FieldDescriptor, FieldValue, Record};
