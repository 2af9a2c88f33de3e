//! Decode-then-validate
//!
//! `Decoder` reads successive JSON values from a stream. Each decoded record's values are fed
//! into an existing `Validator`, which is then run. Decode failures skip validation entirely.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::de::IoRead;
use serde_json::Value;

use super::engine::Validator;
use super::errors::FieldCheckResult;
use super::layout::RecordLayout;
use super::types::Record;

/// Streaming JSON decoder bound to a reader.
pub struct Decoder<R: Read> {
    de: serde_json::Deserializer<IoRead<R>>,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            de: serde_json::Deserializer::from_reader(reader),
        }
    }

    /// Decodes the next value from the stream.
    pub fn decode<T: DeserializeOwned>(&mut self) -> FieldCheckResult<T> {
        Ok(T::deserialize(&mut self.de)?)
    }

    /// Decodes the next record, loads its values into `validator` and validates.
    ///
    /// # Errors
    ///
    /// - `FieldCheckError::Decode` if the payload does not decode (no validation runs)
    /// - `FieldCheckError::ValueCountMismatch` if the record's shape differs from the validator's
    /// - any error `Validator::validate` returns
    pub fn decode_and_validate<T>(&mut self, validator: &mut Validator) -> FieldCheckResult<T>
    where
        T: DeserializeOwned + Record,
    {
        let record: T = self.decode()?;
        validator.add_record_values(&record)?;
        validator.validate()?;
        Ok(record)
    }

    /// Decodes the next JSON document and validates it through a layout.
    ///
    /// `validator` must have been built from `layout` (see `RecordLayout::empty_validator`).
    pub fn decode_json_and_validate(
        &mut self,
        layout: &RecordLayout,
        validator: &mut Validator,
    ) -> FieldCheckResult<Value> {
        let document: Value = self.decode()?;
        validator.add_values(layout.values(&document)?)?;
        validator.validate()?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::errors::FieldCheckError;
    use crate::validator::layout::{FieldKind, FieldSpec};
    use crate::validator::types::{FieldDescriptor, FieldValue};

    #[derive(Debug, Default, serde::Deserialize)]
    struct Item {
        sku: String,
        qty: i32,
    }

    impl Record for Item {
        fn type_name(&self) -> &'static str {
            "Item"
        }

        fn fields(&self) -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("Sku", self.sku.as_str(), "required;len=6"),
                FieldDescriptor::new("Qty", self.qty, ">0"),
            ]
        }
    }

    #[test]
    fn test_decode_stream_of_records() {
        let input = r#"{"sku":"AB1234","qty":2} {"sku":"AB1234","qty":0}"#;
        let mut decoder = Decoder::new(input.as_bytes());
        let mut validator = Validator::from_record(&Item::default());

        let item: Item = decoder.decode_and_validate(&mut validator).unwrap();
        assert_eq!(item.qty, 2);

        let err = decoder.decode_and_validate::<Item>(&mut validator).unwrap_err();
        assert_eq!(err.code(), "RULE_MUST_BE_MORE");
    }

    #[test]
    fn test_decode_failure_skips_validation() {
        let mut decoder = Decoder::new(r#"{"sku": 12}"#.as_bytes());
        let mut validator = Validator::from_record(&Item::default());

        let err = decoder.decode_and_validate::<Item>(&mut validator).unwrap_err();
        assert!(matches!(err, FieldCheckError::Decode(_)));
        // Values were never replaced
        assert_eq!(validator.fields()[0].value, FieldValue::Text(String::new()));
    }

    #[test]
    fn test_decode_json_with_layout() {
        let layout = RecordLayout::new(
            "Item",
            vec![
                FieldSpec::new("sku", FieldKind::Text, "len=6"),
                FieldSpec::new("qty", FieldKind::Int, "<100"),
            ],
        );
        let mut validator = layout.empty_validator();
        let mut decoder = Decoder::new(r#"{"sku":"AB1234","qty":5} {"sku":"AB","qty":5}"#.as_bytes());

        let doc = decoder
            .decode_json_and_validate(&layout, &mut validator)
            .unwrap();
        assert_eq!(doc["qty"], 5);

        let err = decoder
            .decode_json_and_validate(&layout, &mut validator)
            .unwrap_err();
        assert_eq!(err.code(), "RULE_LEN_MUST_BE");
    }
}
