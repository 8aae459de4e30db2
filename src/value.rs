//! This module declares a generic Value enum for use with validation.

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use float_ord::FloatOrd;
use bigdecimal::BigDecimal;
use serde::ser::{Serialize, Serializer};
use strum_macros::Display;

/// `Value` represents all the types of data we can validate.
///
/// Parsers produce the first group of variants; normalizers may produce the
/// leaf types in the second group (decoded bytes, decimals, dates and times).
/// To validate a new type of data, write implementations of the `From`
/// trait for that type.  See the [`json`] module for an example.
///
/// [`json`]: crate::json
///
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd)]
#[allow(missing_docs)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i128),
    Float(FloatOrd<f64>),
    Text(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),

    Bytes(Vec<u8>),
    Decimal(BigDecimal),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(Timestamp),
}

/// A parsed date and time, with or without a UTC offset.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Timestamp {
    /// No offset was given.
    Naive(NaiveDateTime),
    /// An explicit offset (or `Z`) was given.
    Offset(DateTime<FixedOffset>),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Timestamp::Offset(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

/// The runtime type of a [`Value`].
///
/// A `Kind` is the simplest schema: data matches if it has that type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Kind {
    /// Nothing
    #[strum(serialize = "null")]
    Null,
    /// true or false
    #[strum(serialize = "bool")]
    Bool,
    /// A positive or negative integer
    #[strum(serialize = "int")]
    Integer,
    /// A floating-point value
    #[strum(serialize = "float")]
    Float,
    /// A text string
    #[strum(serialize = "str")]
    Text,
    /// A sequence of values
    #[strum(serialize = "list")]
    Sequence,
    /// A mapping from string keys to values
    #[strum(serialize = "dict")]
    Mapping,
    /// A byte string
    #[strum(serialize = "bytes")]
    Bytes,
    /// An arbitrary-precision decimal
    #[strum(serialize = "decimal")]
    Decimal,
    /// A calendar date
    #[strum(serialize = "date")]
    Date,
    /// A time of day
    #[strum(serialize = "time")]
    Time,
    /// A date and time
    #[strum(serialize = "datetime")]
    DateTime,
}

impl Value {
    /// The runtime type of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Text(_) => Kind::Text,
            Value::Array(_) => Kind::Sequence,
            Value::Map(_) => Kind::Mapping,
            Value::Bytes(_) => Kind::Bytes,
            Value::Decimal(_) => Kind::Decimal,
            Value::Date(_) => Kind::Date,
            Value::Time(_) => Kind::Time,
            Value::DateTime(_) => Kind::DateTime,
        }
    }

    /// Returns the string, if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    // Only exists so implementers don't need to use/see float_ord::FloatOrd
    pub(crate) fn from_float<F: Into<f64>>(f: F) -> Value {
        Value::Float(FloatOrd(f.into()))
    }
}

// FloatOrd doesn't implement Debug, so we have to do all the work by hand.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(x) => fmt::Debug::fmt(x, f),
            Value::Integer(x) => fmt::Debug::fmt(x, f),
            Value::Float(x) => fmt::Debug::fmt(&x.0, f),
            Value::Text(x) => fmt::Debug::fmt(x, f),
            Value::Array(x) => fmt::Debug::fmt(x, f),
            Value::Map(x) => fmt::Debug::fmt(x, f),
            Value::Bytes(x) => fmt::Debug::fmt(x, f),
            Value::Decimal(x) => write!(f, "Decimal({})", x),
            Value::Date(x) => write!(f, "Date({})", x),
            Value::Time(x) => write!(f, "Time({})", x),
            Value::DateTime(x) => write!(f, "DateTime({})", x),
        }
    }
}

// Used when a value is quoted inside a message; strings appear unquoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Text(x) => f.write_str(x),
            Value::Decimal(x) => fmt::Display::fmt(x, f),
            Value::Date(x) => fmt::Display::fmt(x, f),
            Value::Time(x) => fmt::Display::fmt(x, f),
            Value::DateTime(x) => fmt::Display::fmt(x, f),
            other => write!(f, "{:?}", other),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => {
                // Not every serializer can handle i128, so prefer the
                // narrowest type that holds the value.
                if let Ok(i) = i64::try_from(*i) {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = u64::try_from(*i) {
                    serializer.serialize_u64(u)
                } else {
                    serializer.serialize_i128(*i)
                }
            }
            Value::Float(x) => serializer.serialize_f64(x.0),
            Value::Text(t) => serializer.serialize_str(t),
            Value::Array(a) => serializer.collect_seq(a),
            Value::Map(m) => serializer.collect_map(m),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Decimal(d) => serializer.collect_str(d),
            Value::Date(d) => serializer.collect_str(d),
            Value::Time(t) => serializer.collect_str(t),
            Value::DateTime(dt) => serializer.collect_str(dt),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Value {
                    Value::Integer(i.into())
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::from_float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Value {
        Value::Array(a)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(m: BTreeMap<String, Value>) -> Value {
        Value::Map(m)
    }
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Value {
        Value::Decimal(d)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Value {
        Value::DateTime(t)
    }
}
