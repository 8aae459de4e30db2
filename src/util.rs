//! This module defines error and result types.
//!

use crate::value::Value;
use std::error;
use std::fmt;
use std::result::Result;

/// The error type returned by [`check`](crate::check) and friends.
///
/// Only [`Invalid`](CheckError::Invalid) describes data that didn't conform
/// to a schema.  The other variants are never collected by combinators or
/// mapping templates; they abort the whole check.
#[allow(missing_docs)]
#[rustversion::attr(since(1.40), non_exhaustive)]
#[derive(Debug, PartialEq)]
pub enum CheckError {
    /// The data doesn't conform to the schema.
    Invalid(ValidationError),
    /// A normalizer's converter rejected a value the inner schema accepted.
    Conversion(String),
    /// A logical error in the schema structure.
    Structural(String),
    /// A data value that can't be represented as a [`Value`].
    ValueError(String),
}

/// One violation found during validation.
///
/// `message` is the complete human-readable text, which already mentions
/// the path.
#[derive(Clone, Debug, PartialEq)]
pub struct Violation {
    path: String,
    message: String,
}

impl Violation {
    /// The location of the offending value, e.g. `[0]{a}`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The human-readable description of the violation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A validation failure.
///
/// Failures of sibling nodes are aggregated into a single error: the
/// messages are joined with `" and "` (mapping keys, AND) or `" or "` (OR),
/// while the individual violations stay available through
/// [`violations`](ValidationError::violations).
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    message: String,
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Create an error holding a single violation.
    pub fn new<P, M>(path: P, message: M) -> ValidationError
    where
        P: Into<String>,
        M: Into<String>,
    {
        let violation = Violation {
            path: path.into(),
            message: message.into(),
        };
        ValidationError {
            message: violation.message.clone(),
            violations: vec![violation],
        }
    }

    /// Merge several errors into one, joining their messages with `sep`.
    pub(crate) fn join(errors: Vec<ValidationError>, sep: &str) -> ValidationError {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(sep);
        let violations = errors.into_iter().flat_map(|e| e.violations).collect();
        ValidationError {
            message,
            violations,
        }
    }

    /// The aggregated message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every individual violation, in the order they were found.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for ValidationError {}

impl CheckError {
    /// Returns true if this is a data validation failure.
    pub fn is_invalid(&self) -> bool {
        matches!(self, CheckError::Invalid(_))
    }

    /// Access the validation failure, if this is one.
    pub fn as_invalid(&self) -> Option<&ValidationError> {
        match self {
            CheckError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for CheckError {
    fn from(e: ValidationError) -> Self {
        CheckError::Invalid(e)
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use CheckError::*;
        match self {
            Invalid(e) => fmt::Display::fmt(e, f),
            Conversion(msg) => write!(f, "Conversion({})", msg),
            Structural(msg) => write!(f, "Structural({})", msg),
            ValueError(msg) => write!(f, "ValueError({})", msg),
        }
    }
}

// Standard boilerplate, required so other errors can wrap this one.
impl error::Error for CheckError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            CheckError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

/// Shortcut for creating validation failures.
#[doc(hidden)]
pub fn invalid<M: Into<String>>(path: &str, message: M) -> CheckError {
    CheckError::Invalid(ValidationError::new(path, message))
}

/// Separate validation failures, which callers may collect, from errors
/// that must abort the whole check.
pub(crate) fn recoverable(result: CheckResult) -> CheckResult<Result<Value, ValidationError>> {
    match result {
        Ok(v) => Ok(Ok(v)),
        Err(CheckError::Invalid(e)) => Ok(Err(e)),
        Err(e) => Err(e),
    }
}

/// How a path is named at the start of a message.
///
/// The root path is empty, which would make for an odd sentence.
pub(crate) fn subject(path: &str) -> &str {
    if path.is_empty() {
        "value"
    } else {
        path
    }
}

/// The result of a check: the validated (and possibly transformed) value.
pub type CheckResult<T = Value> = Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_keeps_violations() {
        let a = ValidationError::new("{a}", "{a} should be a string");
        let b = ValidationError::new("{b}", "{b} should be a list");
        let joined = ValidationError::join(vec![a, b], " and ");
        assert_eq!(
            joined.message(),
            "{a} should be a string and {b} should be a list"
        );
        let paths: Vec<&str> = joined.violations().iter().map(Violation::path).collect();
        assert_eq!(paths, ["{a}", "{b}"]);
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = invalid("", "value should be a dict");
        assert!(err.is_invalid());
        assert_eq!(err.to_string(), "value should be a dict");
        assert_eq!(
            CheckError::Structural("oops".into()).to_string(),
            "Structural(oops)"
        );
    }
}
