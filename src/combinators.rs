//! This module contains the schema combinators: OR, AND, and the
//! mandatory marker.
//!
//! Combinators only collect validation failures.  Any other error (a
//! malformed schema, a failing converter) is returned immediately.

use crate::schema::{Schema, Validator};
use crate::util::{recoverable, ValidationError};
use crate::validate::check_at;
use log::debug;

/// Accept the data if any of the schemas accepts it.
///
/// Schemas are tried in order against the original data, and the result of
/// the first one that succeeds is returned.  If all of them fail, their
/// messages are joined with `" or "`.
///
/// With no schemas at all, anything is accepted unchanged; see [`any`].
pub fn or<I>(schemas: I) -> Schema
where
    I: IntoIterator,
    I::Item: Into<Schema>,
{
    let schemas: Vec<Schema> = schemas.into_iter().map(Into::into).collect();
    let validator = Validator::new(move |data, path| {
        let mut errors = Vec::new();
        for schema in &schemas {
            match recoverable(check_at(data, schema, path))? {
                Ok(value) => return Ok(value),
                Err(e) => errors.push(e),
            }
        }
        if errors.is_empty() {
            Ok(data.clone())
        } else {
            debug!("all {} choices failed", errors.len());
            Err(ValidationError::join(errors, " or ").into())
        }
    });
    validator.into()
}

/// Accept the data only if every schema accepts it.
///
/// Each schema sees the value produced by the previous successful schema,
/// so transformations chain.  A failing schema doesn't stop the others from
/// running; they keep working on the last successfully produced value.  If
/// any schema failed, the messages are joined with `" and "`.
pub fn and<I>(schemas: I) -> Schema
where
    I: IntoIterator,
    I::Item: Into<Schema>,
{
    let schemas: Vec<Schema> = schemas.into_iter().map(Into::into).collect();
    let validator = Validator::new(move |data, path| {
        let mut current = data.clone();
        let mut errors = Vec::new();
        for schema in &schemas {
            match recoverable(check_at(&current, schema, path))? {
                Ok(value) => current = value,
                Err(e) => errors.push(e),
            }
        }
        if errors.is_empty() {
            Ok(current)
        } else {
            debug!("{} of {} checks failed", errors.len(), schemas.len());
            Err(ValidationError::join(errors, " and ").into())
        }
    });
    validator.into()
}

/// Mark a schema as mandatory.
///
/// Validation is unchanged; a mapping template using the result as a value
/// schema will require that key to be present.
pub fn mandatory<S: Into<Schema>>(schema: S) -> Schema {
    let schema = schema.into();
    Validator::new(move |data, path| check_at(data, &schema, path))
        .required()
        .into()
}

/// The wildcard schema: accepts anything, unchanged.
pub fn any() -> Schema {
    or(Vec::<Schema>::new())
}

/// Build an [`or`] schema from a list of anything that converts into a
/// [`Schema`].
///
/// ```
/// use poorman_schema::{check, or, Kind, Value};
///
/// let schema = or![Kind::Null, Kind::Integer];
/// check(&Value::Null, &schema).unwrap();
/// check(&Value::from(1), &schema).unwrap();
/// check(&Value::from("1"), &schema).unwrap_err();
/// ```
#[macro_export]
macro_rules! or {
    ($($schema:expr),* $(,)?) => {
        $crate::combinators::or(::std::vec::Vec::<$crate::Schema>::from([
            $($crate::Schema::from($schema)),*
        ]))
    };
}

/// Build an [`and`] schema from a list of anything that converts into a
/// [`Schema`].
#[macro_export]
macro_rules! and {
    ($($schema:expr),* $(,)?) => {
        $crate::combinators::and(::std::vec::Vec::<$crate::Schema>::from([
            $($crate::Schema::from($schema)),*
        ]))
    };
}
