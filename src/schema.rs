//! This module defines the schema tree.
//!
//! A [`Schema`] describes what a [`Value`] must look like.  It is built once,
//! from plain values, templates and [`Validator`]s, and can then be used for
//! any number of checks, including from several threads at once.

use crate::util::CheckResult;
use crate::value::{Kind, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The signature of a validator function.
///
/// It receives the data and the path of the data (for diagnostics), and
/// returns the validated, possibly transformed, data.
pub type ValidatorFn = dyn Fn(&Value, &str) -> CheckResult + Send + Sync;

/// An opaque validation function.
///
/// All leaf validators and combinators are built on this.  A validator may
/// also be marked as mandatory; that only matters when it is used as the
/// value schema inside a mapping template.
#[derive(Clone)]
pub struct Validator {
    func: Arc<ValidatorFn>,
    mandatory: bool,
}

impl Validator {
    /// Create a validator from a function.
    pub fn new<F>(func: F) -> Validator
    where
        F: Fn(&Value, &str) -> CheckResult + Send + Sync + 'static,
    {
        Validator {
            func: Arc::new(func),
            mandatory: false,
        }
    }

    /// Mark this validator as mandatory.
    pub fn required(mut self) -> Validator {
        self.mandatory = true;
        self
    }

    /// Whether a mapping key using this validator must be present.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Run the validator.
    pub fn call(&self, data: &Value, path: &str) -> CheckResult {
        (self.func)(data, path)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("mandatory", &self.mandatory)
            .finish()
    }
}

/// A composable description of the expected data.
#[derive(Clone, Debug)]
pub enum Schema {
    /// The data must have this type.  It is returned unchanged.
    Type(Kind),
    /// The data must be a string equal to this one.
    Literal(String),
    /// The data must be a sequence.
    ///
    /// An empty template accepts any sequence.  A template with one element
    /// checks every element of the data against it.  More than one element
    /// is a schema error.
    Sequence(Vec<Schema>),
    /// The data must be a mapping.
    ///
    /// An empty template accepts any mapping.  Otherwise every key in the
    /// data must be declared here, and every key whose schema is a mandatory
    /// [`Validator`] must be present in the data.
    Mapping(BTreeMap<String, Schema>),
    /// Custom logic: leaf validators, combinators, and markers.
    Validator(Validator),
}

impl Schema {
    /// A sequence template with the given element schema.
    pub fn sequence<S: Into<Schema>>(element: S) -> Schema {
        Schema::Sequence(vec![element.into()])
    }

    /// A mapping template from `(key, schema)` pairs.
    pub fn mapping<I, K, S>(entries: I) -> Schema
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        let map = entries
            .into_iter()
            .map(|(k, s)| (k.into(), s.into()))
            .collect();
        Schema::Mapping(map)
    }

    /// A literal string.
    pub fn literal<T: Into<String>>(s: T) -> Schema {
        Schema::Literal(s.into())
    }

    /// True if this schema is a validator carrying the mandatory marker.
    pub fn is_mandatory(&self) -> bool {
        match self {
            Schema::Validator(v) => v.is_mandatory(),
            _ => false,
        }
    }
}

impl From<Kind> for Schema {
    fn from(k: Kind) -> Schema {
        Schema::Type(k)
    }
}

impl From<&str> for Schema {
    fn from(s: &str) -> Schema {
        Schema::Literal(s.to_string())
    }
}

impl From<String> for Schema {
    fn from(s: String) -> Schema {
        Schema::Literal(s)
    }
}

impl From<Vec<Schema>> for Schema {
    fn from(v: Vec<Schema>) -> Schema {
        Schema::Sequence(v)
    }
}

impl From<BTreeMap<String, Schema>> for Schema {
    fn from(m: BTreeMap<String, Schema>) -> Schema {
        Schema::Mapping(m)
    }
}

impl From<Validator> for Schema {
    fn from(v: Validator) -> Schema {
        Schema::Validator(v)
    }
}

/// Build a mapping template.
///
/// ```
/// use poorman_schema::{mapping, mandatory, Kind};
///
/// let schema = mapping! {
///     "name" => mandatory(Kind::Text),
///     "age" => Kind::Integer,
/// };
/// ```
#[macro_export]
macro_rules! mapping {
    ($($key:expr => $schema:expr),* $(,)?) => {{
        let entries: Vec<(String, $crate::Schema)> = vec![
            $(($key.to_string(), $crate::Schema::from($schema))),*
        ];
        $crate::Schema::mapping(entries)
    }};
}
