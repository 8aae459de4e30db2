//! This module defines the TemporalParser trait.
//!
//! The date and time normalizers don't parse anything themselves; they ask
//! a [`TemporalParser`] to do it.  The parser is only invoked when one of
//! those normalizers actually runs, and a different implementation can be
//! supplied when the schema is built (see [`datetime_with`]).
//!
//! [`datetime_with`]: crate::normalize::datetime_with

use crate::util::{CheckError, CheckResult};
use crate::value::Timestamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parses the strings accepted by the ISO 8601 patterns.
///
/// Errors should be [`CheckError::Conversion`]; they are not treated as
/// validation failures.
pub trait TemporalParser: Send + Sync {
    /// Parse a date and time, with an optional offset.
    fn parse_datetime(&self, s: &str) -> CheckResult<Timestamp>;
    /// Parse a calendar date.
    fn parse_date(&self, s: &str) -> CheckResult<NaiveDate>;
    /// Parse a time of day.
    fn parse_time(&self, s: &str) -> CheckResult<NaiveTime>;
}

/// The default parser, built on `chrono`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChronoParser;

fn conversion(what: &str, s: &str, e: chrono::ParseError) -> CheckError {
    CheckError::Conversion(format!("can't parse {} from {:?}: {}", what, s, e))
}

impl TemporalParser for ChronoParser {
    fn parse_datetime(&self, s: &str) -> CheckResult<Timestamp> {
        // With an offset (or `Z`) we keep it; without one the result is naive.
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp::Offset(dt));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(Timestamp::Naive)
            .map_err(|e| conversion("datetime", s, e))
    }

    fn parse_date(&self, s: &str) -> CheckResult<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| conversion("date", s, e))
    }

    fn parse_time(&self, s: &str) -> CheckResult<NaiveTime> {
        NaiveTime::parse_from_str(s, "%H:%M:%S%.f").map_err(|e| conversion("time", s, e))
    }
}

#[doc(hidden)] // Only pub for integration tests
#[allow(missing_docs)]
pub mod tests {
    use super::{CheckError, CheckResult, TemporalParser, Timestamp};
    use chrono::{NaiveDate, NaiveTime};

    /// A [TemporalParser] that fails every parse
    pub struct DummyParser {}

    impl DummyParser {
        #![allow(clippy::new_without_default)]
        pub fn new() -> DummyParser {
            DummyParser {}
        }
    }

    fn oops<T>() -> CheckResult<T> {
        Err(CheckError::Conversion("DummyParser failure".into()))
    }

    impl TemporalParser for DummyParser {
        fn parse_datetime(&self, _s: &str) -> CheckResult<Timestamp> {
            oops()
        }

        fn parse_date(&self, _s: &str) -> CheckResult<NaiveDate> {
            oops()
        }

        fn parse_time(&self, _s: &str) -> CheckResult<NaiveTime> {
            oops()
        }
    }
}
