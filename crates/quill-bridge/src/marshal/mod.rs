//! Conversion of raw engine values into host-native records.
//!
//! Each collection is converted item by item: an item with an unexpected
//! shape is logged and dropped while the rest of the batch survives. Shape
//! errors at the top level of a result are returned to the caller instead.

pub(crate) mod code_actions;
pub(crate) mod completions;
pub(crate) mod diagnostics;
pub(crate) mod emit;
pub(crate) mod navigation;
pub(crate) mod overview;
pub mod text;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::errors::MarshalError;

const MARSHAL_TARGET: &str = "quill::marshal";

/// Decodes `value` into `T`, labelling failures with `item`.
pub(crate) fn decode<T: DeserializeOwned>(item: &'static str, value: Value) -> Result<T, MarshalError> {
    serde_json::from_value(value).map_err(|error| MarshalError::shape(item, error))
}

/// Converts every value with `convert`, skipping the ones that fail.
pub(crate) fn convert_each<U>(
    item: &'static str,
    values: Vec<Value>,
    mut convert: impl FnMut(Value) -> Result<U, MarshalError>,
) -> Vec<U> {
    let mut converted = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match convert(value) {
            Ok(record) => converted.push(record),
            Err(error) => warn!(
                target: MARSHAL_TARGET,
                item,
                index,
                %error,
                "skipping malformed item"
            ),
        }
    }
    converted
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn skips_items_that_fail_and_keeps_order() {
        let values = vec![
            json!({ "name": "first" }),
            json!({ "nom": "broken" }),
            json!({ "name": "third" }),
        ];

        let converted = convert_each("named", values, |value| decode::<Named>("named", value));

        assert_eq!(
            converted,
            vec![
                Named {
                    name: String::from("first")
                },
                Named {
                    name: String::from("third")
                },
            ]
        );
    }

    #[test]
    fn labels_shape_errors_with_the_item() {
        let error = decode::<Named>("named thing", json!(42)).expect_err("should fail");

        assert!(error.to_string().starts_with("malformed named thing"));
    }
}
