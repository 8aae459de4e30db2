//! This module implements validation of [`serde_cbor::Value`].
//!
//! Validation of data requires converting data to a generic type [`Value`].
//! CBOR allows map keys of any type, but mapping templates only know about
//! text keys, so anything else is rejected during conversion.

#![cfg(feature = "serde_cbor")]

use crate::schema::Schema;
use crate::util::{CheckError, CheckResult};
use crate::validate::check;
use crate::value::Value;
use serde_cbor::Value as CBOR_Value;
use std::collections::BTreeMap;
use std::convert::TryFrom;

impl TryFrom<&CBOR_Value> for Value {
    type Error = CheckError;

    fn try_from(value: &CBOR_Value) -> Result<Self, Self::Error> {
        let result = match value {
            CBOR_Value::Null => Value::Null,
            CBOR_Value::Bool(b) => Value::Bool(*b),
            CBOR_Value::Integer(i) => Value::Integer(*i),
            CBOR_Value::Float(f) => Value::from_float(*f),
            CBOR_Value::Bytes(b) => Value::Bytes(b.clone()),
            CBOR_Value::Text(t) => Value::Text(t.clone()),
            CBOR_Value::Array(a) => {
                let array: Result<_, _> = a.iter().map(Value::try_from).collect();
                Value::Array(array?)
            }
            CBOR_Value::Map(m) => {
                let map: Result<BTreeMap<String, Value>, CheckError> = m
                    .iter()
                    .map(|(k, v)| match k {
                        CBOR_Value::Text(key) => Ok((key.clone(), Value::try_from(v)?)),
                        other => Err(CheckError::ValueError(format!(
                            "non-text map key {:?}",
                            other
                        ))),
                    })
                    .collect();
                Value::Map(map?)
            }
            // Tags carry no meaning for validation; look through them.
            CBOR_Value::Tag(_, inner) => Value::try_from(inner.as_ref())?,
            _ => {
                return Err(CheckError::ValueError(
                    "can't handle hidden cbor Value".into(),
                ))
            }
        };
        Ok(result)
    }
}

// A variant that consumes the CBOR Value.
impl TryFrom<CBOR_Value> for Value {
    type Error = CheckError;

    fn try_from(value: CBOR_Value) -> Result<Self, Self::Error> {
        Value::try_from(&value)
    }
}

/// Check already-parsed CBOR data against a schema.
pub fn check_cbor(value: &CBOR_Value, schema: &Schema) -> CheckResult {
    let value = Value::try_from(value)?;
    check(&value, schema)
}

/// Check CBOR-encoded bytes against a schema.
pub fn check_cbor_bytes(cbor: &[u8], schema: &Schema) -> CheckResult {
    let cbor_value: CBOR_Value = serde_cbor::from_slice(cbor).map_err(|e| {
        let msg = format!("cbor parsing failed: {}", e);
        CheckError::ValueError(msg)
    })?;
    let value = Value::try_from(cbor_value)?;
    check(&value, schema)
}
