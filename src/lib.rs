//! `poorman-schema` is a library for validating and normalizing untyped
//! nested data: the kind of tree produced by parsing JSON or CBOR.
//!
//! A schema is built from a handful of composable pieces:
//!
//! - A [`Kind`]: the data must have that type.
//! - A literal string: the data must be equal to it.
//! - A sequence template: every element is checked against one schema.
//! - A mapping template: keys are checked against a fixed set, some of them
//!   [`mandatory`], and each value is checked against its own schema.
//! - A [`Validator`]: arbitrary logic.  Regular expressions ([`re`]),
//!   normalizers ([`normalize`]), and the combinators [`or`] and [`and`] are
//!   all validators.
//!
//! [`check`] walks the data and the schema together and returns a new tree,
//! in which normalizers may have transformed values (stripped strings,
//! parsed dates, decimals).  If anything doesn't match, the result is a
//! single error describing every violation found.
//!
//! # Examples
//!
//! ```
//! use poorman_schema::{iso8601_datetime, mandatory, mapping, or, strip, Kind, Schema};
//! use poorman_schema::json::check_json_str;
//!
//! let schema = Schema::sequence(mapping! {
//!     "a" => mandatory(or![Kind::Null, Kind::Integer, or![strip(), iso8601_datetime()]]),
//!     "b" => Kind::Text,
//! });
//!
//! let out = check_json_str(r#"[{"a": " 2016-12-01T09:34:34 "}]"#, &schema).unwrap();
//! assert_eq!(
//!     poorman_schema::json::to_json(&out).unwrap(),
//!     serde_json::json!([{"a": "2016-12-01T09:34:34"}]),
//! );
//! ```
//!
//! If the data doesn't have the expected structure, every problem is
//! reported at once:
//! ```
//! # use poorman_schema::{mandatory, mapping, re, Kind, Schema};
//! use poorman_schema::json::check_json_str;
//!
//! let schema = Schema::sequence(mapping! {
//!     "a" => mandatory(Kind::Integer),
//!     "b" => Kind::Text,
//!     "c" => re("^a*$").build().unwrap(),
//! });
//! let err = check_json_str(r#"[{"a": 1, "b": 2, "c": "b"}]"#, &schema).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     r#"[0]{b} should be of type "str" and [0]{c}(=="b") does not match /^a*$/"#,
//! );
//! ```
//!
//! # Implementation Details
//!
//! - Supports CBOR and JSON input, controlled by the `serde_cbor` and
//!   `serde_json` features.
//!
//! - Validation is performed by first translating the incoming data into
//!   a generic [`Value`], so the validation code is completely agnostic to
//!   the serialization format.
//!
//! - Schemas are immutable once built, and can be shared between threads.
//!
//! - Only [`CheckError::Invalid`] is a validation failure.  A converter that
//!   fails inside a normalizer produces [`CheckError::Conversion`], and a
//!   malformed schema produces [`CheckError::Structural`]; combinators never
//!   swallow those.
//!
//! - Date and time parsing is delegated to a [`TemporalParser`]; the default
//!   one uses `chrono`.  Decimals use `bigdecimal`, with
//!   no limit on the number of digits.
//!
//! - Diagnostics go through the `log` facade at `trace` and `debug` level.

#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::cast_possible_truncation)]

pub mod combinators;
pub mod context;
pub mod normalize;
pub mod pattern;
pub mod schema;
pub mod util;
pub(crate) mod validate;
pub mod value;

#[doc(inline)]
pub use combinators::{and, any, mandatory, or};
#[doc(inline)]
pub use context::{ChronoParser, TemporalParser};
#[doc(inline)]
pub use normalize::{
    base64_bytes, date, date_with, datetime, datetime_with, decimal, lower, normalize, strip,
    time, time_with, upper,
};
#[doc(inline)]
pub use pattern::{base64, iso8601_date, iso8601_datetime, iso8601_time, re, Re};
#[doc(inline)]
pub use schema::{Schema, Validator};
#[doc(inline)]
pub use util::{CheckError, CheckResult, ValidationError, Violation};
#[doc(inline)]
pub use validate::{check, check_at};
#[doc(inline)]
pub use value::{Kind, Timestamp, Value};

#[cfg(feature = "serde_cbor")]
pub mod cbor;
#[cfg(feature = "serde_cbor")]
#[doc(inline)]
pub use cbor::{check_cbor, check_cbor_bytes};

#[cfg(feature = "serde_json")]
pub mod json;
#[cfg(feature = "serde_json")]
#[doc(inline)]
pub use json::{check_json, check_json_str};
