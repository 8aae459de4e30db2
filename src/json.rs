//! This module implements validation of [`serde_json::Value`].
//!
//! # Examples
//!
//! ```
//! use poorman_schema::{mandatory, mapping, Kind};
//! use poorman_schema::json::check_json_str;
//!
//! let schema = mapping! { "name" => mandatory(Kind::Text), "age" => Kind::Integer };
//! let json_str = r#"{ "name": "Bob", "age": 43 }"#;
//!
//! check_json_str(json_str, &schema).unwrap();
//! ```
//!

#![cfg(feature = "serde_json")]

use crate::schema::Schema;
use crate::util::{CheckError, CheckResult};
use crate::validate::check;
use crate::value::Value;
use serde_json::Value as JSON_Value;
use std::collections::BTreeMap;
use std::convert::TryFrom;

// Convert JSON `Value`s to the local `Value` type that the validate code
// uses.

impl TryFrom<&JSON_Value> for Value {
    type Error = CheckError;

    fn try_from(value: &JSON_Value) -> Result<Self, Self::Error> {
        let result = match value {
            JSON_Value::Null => Value::Null,
            JSON_Value::Bool(b) => Value::Bool(*b),
            JSON_Value::Number(num) => {
                if let Some(u) = num.as_u64() {
                    Value::Integer(u as i128)
                } else if let Some(i) = num.as_i64() {
                    Value::Integer(i as i128)
                } else if let Some(f) = num.as_f64() {
                    Value::from_float(f)
                } else {
                    return Err(CheckError::ValueError(
                        "JSON Value::Number conversion failure".into(),
                    ));
                }
            }
            JSON_Value::String(t) => Value::Text(t.clone()),
            JSON_Value::Array(a) => {
                let array: Result<_, _> = a.iter().map(Value::try_from).collect();
                Value::Array(array?)
            }
            JSON_Value::Object(m) => {
                type MapTree = BTreeMap<String, Value>;
                let map: Result<MapTree, CheckError> = m
                    .iter()
                    .map(|(k, v)| {
                        // An iterator returning a 2-tuple can be used as (key, value)
                        // when building a new map.
                        Ok((k.clone(), Value::try_from(v)?))
                    })
                    .collect();
                Value::Map(map?)
            }
        };
        Ok(result)
    }
}

// A variant that consumes the JSON Value.
impl TryFrom<JSON_Value> for Value {
    type Error = CheckError;

    fn try_from(value: JSON_Value) -> Result<Self, Self::Error> {
        Value::try_from(&value)
    }
}

/// Check already-parsed JSON data against a schema.
pub fn check_json(value: &JSON_Value, schema: &Schema) -> CheckResult {
    let value = Value::try_from(value)?;
    check(&value, schema)
}

/// Check JSON text against a schema.
pub fn check_json_str(json: &str, schema: &Schema) -> CheckResult {
    // Deserialize the JSON text
    let json_value: JSON_Value =
        serde_json::from_str(json).map_err(|e| CheckError::ValueError(format!("{}", e)))?;

    // Convert the JSON tree into a Value tree for validation
    let value = Value::try_from(json_value)?;
    check(&value, schema)
}

/// Convert a (validated) value back into JSON.
///
/// Decimals, dates and times become strings; bytes become an array of
/// numbers.
pub fn to_json(value: &Value) -> CheckResult<JSON_Value> {
    serde_json::to_value(value).map_err(|e| CheckError::ValueError(format!("{}", e)))
}
