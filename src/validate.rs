//! This module contains the recursive dispatcher.
//!
//! It walks a [`Value`] tree and a [`Schema`] tree in lock-step, building a
//! new tree out of whatever the schema's validators return.

use crate::schema::Schema;
use crate::util::{invalid, recoverable, subject, CheckError, CheckResult, ValidationError};
use crate::value::{Kind, Value};
use log::{debug, trace};
use std::collections::BTreeMap;

type SchemaMap = BTreeMap<String, Schema>;
type ValueMap = BTreeMap<String, Value>;

/// Check `data` against `schema`, starting at the root path.
///
/// On success, returns a newly built tree containing the validated (and
/// possibly transformed) data.
///
/// # Examples
///
/// ```
/// use poorman_schema::{check, Kind, Schema, Value};
///
/// let schema = Schema::sequence(Kind::Integer);
/// let data = Value::Array(vec![Value::from(1), Value::from(2)]);
/// assert_eq!(check(&data, &schema).unwrap(), data);
///
/// let data = Value::Array(vec![Value::from("one")]);
/// let err = check(&data, &schema).unwrap_err();
/// assert_eq!(err.to_string(), r#"[0] should be of type "int""#);
/// ```
pub fn check(data: &Value, schema: &Schema) -> CheckResult {
    check_at(data, schema, "")
}

// This is the main validation dispatch function.
// It tries to match a Schema and a Value, recursing as needed.

/// Check `data` against `schema`; `path` locates `data` in diagnostics.
pub fn check_at(data: &Value, schema: &Schema, path: &str) -> CheckResult {
    trace!("checking {} ({})", subject(path), data.kind());
    match schema {
        Schema::Validator(v) => v.call(data, path),
        Schema::Sequence(s) => validate_sequence(s, data, path),
        Schema::Type(Kind::Sequence) => validate_sequence(&[], data, path),
        Schema::Mapping(m) => validate_mapping(m, data, path),
        Schema::Type(Kind::Mapping) => validate_mapping(&SchemaMap::new(), data, path),
        Schema::Literal(l) => validate_literal(l, data, path),
        Schema::Type(k) => validate_kind(*k, data, path),
    }
}

fn validate_sequence(template: &[Schema], value: &Value, path: &str) -> CheckResult {
    match value {
        Value::Array(a) => validate_sequence_part2(template, a, path),
        _ => Err(invalid(path, format!("{} should be a list", subject(path)))),
    }
}

fn validate_sequence_part2(template: &[Schema], values: &[Value], path: &str) -> CheckResult {
    match template {
        [] => Ok(Value::Array(values.to_vec())),
        [element] => {
            // The first failing element ends the check.
            let array: Result<Vec<Value>, _> = values
                .iter()
                .enumerate()
                .map(|(i, v)| check_at(v, element, &format!("{}[{}]", path, i)))
                .collect();
            Ok(Value::Array(array?))
        }
        _ => Err(CheckError::Structural(
            "schema lists must have at most one element".into(),
        )),
    }
}

fn validate_mapping(template: &SchemaMap, value: &Value, path: &str) -> CheckResult {
    match value {
        Value::Map(m) => validate_mapping_part2(template, m, path),
        _ => Err(invalid(path, format!("{} should be a dict", subject(path)))),
    }
}

fn validate_mapping_part2(template: &SchemaMap, value_map: &ValueMap, path: &str) -> CheckResult {
    if template.is_empty() {
        return Ok(Value::Map(value_map.clone()));
    }

    // Strategy for validating a map:
    // 1. Every key in the data must be declared in the template.
    // 2. Every key whose schema is mandatory must be present in the data.
    // 3. Every key found in both is validated against its schema.
    // All of the failures are collected and reported together.
    let mut errors: Vec<ValidationError> = Vec::new();

    if value_map.keys().any(|k| !template.contains_key(k)) {
        let msg = format!(
            "{} keys({}) are not a subset of {}",
            subject(path),
            join_keys(value_map.keys()),
            join_keys(template.keys()),
        );
        errors.push(ValidationError::new(path, msg));
    }

    let mandatory_keys: Vec<&String> = template
        .iter()
        .filter(|(_, schema)| schema.is_mandatory())
        .map(|(key, _)| key)
        .collect();
    if mandatory_keys.iter().any(|k| !value_map.contains_key(*k)) {
        let msg = format!(
            "{} keys(=={}) are not a superset of {}",
            subject(path),
            join_keys(value_map.keys()),
            join_keys(mandatory_keys),
        );
        errors.push(ValidationError::new(path, msg));
    }

    let mut result = ValueMap::new();
    for (key, value) in value_map {
        if let Some(schema) = template.get(key) {
            let key_path = format!("{}{{{}}}", path, key);
            match recoverable(check_at(value, schema, &key_path))? {
                Ok(v) => {
                    result.insert(key.clone(), v);
                }
                Err(e) => errors.push(e),
            }
        }
    }

    if errors.is_empty() {
        Ok(Value::Map(result))
    } else {
        debug!("{} failed with {} violation(s)", subject(path), errors.len());
        Err(ValidationError::join(errors, " and ").into())
    }
}

// BTreeMap keys are already sorted.
fn join_keys<I, K>(keys: I) -> String
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    keys.into_iter()
        .map(|k| k.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn validate_literal(literal: &str, value: &Value, path: &str) -> CheckResult {
    match value {
        Value::Text(t) if t == literal => Ok(value.clone()),
        _ => {
            let who = if path.is_empty() {
                "value".to_string()
            } else {
                format!("{} value", path)
            };
            let msg = format!("{} should be {}, but it's {}", who, literal, value);
            Err(invalid(path, msg))
        }
    }
}

fn validate_kind(kind: Kind, value: &Value, path: &str) -> CheckResult {
    if value.kind() == kind {
        Ok(value.clone())
    } else {
        Err(invalid(
            path,
            format!("{} should be of type \"{}\"", subject(path), kind),
        ))
    }
}
