//! This module contains code to normalize data into desired formats
//!
//! A normalizer first validates the data against an inner schema, then
//! passes the result through a converter.  Converter errors are returned
//! as-is: they are not validation failures, and OR/AND won't try the next
//! alternative when one occurs.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::context::{ChronoParser, TemporalParser};
use crate::pattern::{self, iso8601_date, iso8601_datetime, iso8601_time};
use crate::schema::{Schema, Validator};
use crate::util::{CheckError, CheckResult};
use crate::validate::check_at;
use crate::value::{Kind, Value};

/// Validate against `schema`, then convert the result.
///
/// ```
/// use poorman_schema::{check, normalize, Kind, Value};
///
/// let double = normalize(Kind::Integer, |v| match v {
///     Value::Integer(i) => Ok(Value::Integer(i * 2)),
///     _ => unreachable!(),
/// });
/// assert_eq!(check(&Value::from(21), &double).unwrap(), Value::from(42));
/// ```
pub fn normalize<S, F>(schema: S, converter: F) -> Schema
where
    S: Into<Schema>,
    F: Fn(Value) -> CheckResult + Send + Sync + 'static,
{
    let schema = schema.into();
    let validator = Validator::new(move |data, path| {
        let data = check_at(data, &schema, path)?;
        converter(data)
    });
    validator.into()
}

// Converters run after the inner schema, so a string should always arrive
// here; anything else is a converter error, not a validation failure.
fn text(value: Value) -> CheckResult<String> {
    match value {
        Value::Text(s) => Ok(s),
        other => Err(CheckError::Conversion(format!(
            "expected a string, got {}",
            other.kind()
        ))),
    }
}

/// Trims leading and trailing whitespace from a string.
pub fn strip() -> Schema {
    normalize(Kind::Text, |v| Ok(Value::Text(text(v)?.trim().to_string())))
}

/// Lower-cases a string.
pub fn lower() -> Schema {
    normalize(Kind::Text, |v| Ok(Value::Text(text(v)?.to_lowercase())))
}

/// Upper-cases a string.
pub fn upper() -> Schema {
    normalize(Kind::Text, |v| Ok(Value::Text(text(v)?.to_uppercase())))
}

/// Parses a string into a [`BigDecimal`].
///
/// There is no limit on the number of digits, and the scale is kept, so
/// `"1.30"` prints back as `1.30`.  Scientific notation (`1.5e3`) is
/// accepted.  A string that isn't a number at all results in
/// [`CheckError::Conversion`].
pub fn decimal() -> Schema {
    normalize(Kind::Text, |v| {
        let s = text(v)?;
        BigDecimal::from_str(&s)
            .map(Value::Decimal)
            .map_err(|e| CheckError::Conversion(format!("invalid decimal {:?}: {}", s, e)))
    })
}

/// Decodes base64 text into [`Value::Bytes`].
pub fn base64_bytes() -> Schema {
    normalize(pattern::base64(), |v| {
        let s = text(v)?;
        base64::decode(&s)
            .map(Value::Bytes)
            .map_err(|e| CheckError::Conversion(format!("invalid base64: {}", e)))
    })
}

/// Parses an ISO 8601 date and time into [`Value::DateTime`].
pub fn datetime() -> Schema {
    datetime_with(Arc::new(ChronoParser))
}

/// Like [`datetime`], using the given parser.
pub fn datetime_with(parser: Arc<dyn TemporalParser>) -> Schema {
    normalize(iso8601_datetime(), move |v| {
        parser.parse_datetime(&text(v)?).map(Value::DateTime)
    })
}

/// Parses an ISO 8601 date into [`Value::Date`].
pub fn date() -> Schema {
    date_with(Arc::new(ChronoParser))
}

/// Like [`date`], using the given parser.
pub fn date_with(parser: Arc<dyn TemporalParser>) -> Schema {
    normalize(iso8601_date(), move |v| {
        parser.parse_date(&text(v)?).map(Value::Date)
    })
}

/// Parses an ISO 8601 time into [`Value::Time`].
pub fn time() -> Schema {
    time_with(Arc::new(ChronoParser))
}

/// Like [`time`], using the given parser.
pub fn time_with(parser: Arc<dyn TemporalParser>) -> Schema {
    normalize(iso8601_time(), move |v| {
        parser.parse_time(&text(v)?).map(Value::Time)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::DummyParser;
    use crate::validate::check;
    use chrono::NaiveDate;

    #[test]
    fn string_normalizers() {
        let v = Value::from("  MiXed Case \t");
        assert_eq!(check(&v, &strip()).unwrap(), Value::from("MiXed Case"));
        assert_eq!(check(&v, &lower()).unwrap(), Value::from("  mixed case \t"));
        assert_eq!(check(&v, &upper()).unwrap(), Value::from("  MIXED CASE \t"));

        let err = check(&Value::from(1), &strip()).unwrap_err();
        assert_eq!(err.to_string(), r#"value should be of type "str""#);
    }

    #[test]
    fn decimals() {
        let out = check(&Value::from("1.3"), &decimal()).unwrap();
        match &out {
            Value::Decimal(d) => {
                assert_eq!(*d, BigDecimal::from_str("1.3").unwrap());
                assert_eq!(d.to_string(), "1.3");
            }
            other => panic!("expected a decimal, got {:?}", other),
        }
        assert_eq!(
            check(&Value::from("1.5e3"), &decimal()).unwrap(),
            Value::Decimal(BigDecimal::from(1500))
        );

        // The inner schema accepts any string; the converter doesn't.
        let err = check(&Value::from("pi"), &decimal()).unwrap_err();
        assert!(matches!(err, CheckError::Conversion(_)));
    }

    #[test]
    fn decimals_keep_every_digit() {
        for digits in &[
            "123456789012345678901234567890",
            "0.12345678901234567890123456789012",
            "-98765432109876543210.98765432109876543210",
        ] {
            let out = check(&Value::from(*digits), &decimal()).unwrap();
            assert_eq!(out.kind(), Kind::Decimal);
            assert_eq!(out.to_string(), *digits);
        }
    }

    #[test]
    fn base64_decoding() {
        let out = check(&Value::from("aGVsbG8="), &base64_bytes()).unwrap();
        assert_eq!(out, Value::Bytes(b"hello".to_vec()));
        let err = check(&Value::from("x"), &base64_bytes()).unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn temporal() {
        let out = check(&Value::from("1023-02-02"), &date()).unwrap();
        assert_eq!(out, Value::Date(NaiveDate::from_ymd_opt(1023, 2, 2).unwrap()));

        let out = check(&Value::from("2016-12-01T09:34:34"), &datetime()).unwrap();
        assert_eq!(out.kind(), Kind::DateTime);
        assert_eq!(out.to_string(), "2016-12-01T09:34:34");

        let out = check(&Value::from("12:12:12"), &time()).unwrap();
        assert_eq!(out.kind(), Kind::Time);

        // The pattern accepts a month of 13; chrono doesn't.
        let err = check(&Value::from("2016-13-01"), &date()).unwrap_err();
        assert!(matches!(err, CheckError::Conversion(_)));
    }

    #[test]
    fn injected_parser() {
        let schema = date_with(Arc::new(DummyParser::new()));
        // The pattern runs first; the parser is never reached.
        let err = check(&Value::from("yesterday"), &schema).unwrap_err();
        assert!(err.is_invalid());

        let err = check(&Value::from("2016-12-01"), &schema).unwrap_err();
        assert_eq!(err, CheckError::Conversion("DummyParser failure".into()));
    }
}
