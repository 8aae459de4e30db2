//! This module implements the regular expression validator.
//!
//! A pattern must match at the start of the string, but not necessarily
//! reach its end; patterns wanting a full match must end with `$`.

use crate::schema::{Schema, Validator};
use crate::util::{invalid, subject, CheckError, CheckResult};
use crate::value::Value;
use regex::{Regex, RegexBuilder};

const ISO8601_DATETIME: &str = r"^\d+-\d+-\d+T\d+:\d+:\d+(?:\.\d+)?(?:Z|\d+:\d+)?$";
const ISO8601_DATE: &str = r"^\d+-\d+-\d+$";
const ISO8601_TIME: &str = r"\d+:\d+:\d+(?:\.\d+)?$";
const BASE64: &str = r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$";

// Previews of mismatched strings are cut to this many characters.
const PREVIEW_LEN: usize = 100;

/// A builder for a regular expression validator.
///
/// ```
/// use poorman_schema::{check, re, Value};
///
/// let schema = re(r"^(\w+)@example\.com$")
///     .replacement("$1")
///     .case_insensitive(true)
///     .build()
///     .unwrap();
/// let out = check(&Value::from("Bob@EXAMPLE.com"), &schema).unwrap();
/// assert_eq!(out, Value::from("Bob"));
/// ```
#[derive(Clone, Debug)]
pub struct Re {
    pattern: String,
    replacement: Option<String>,
    count: usize,
    message: Option<String>,
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    ignore_whitespace: bool,
}

/// Start building a regular expression validator.
pub fn re<P: Into<String>>(pattern: P) -> Re {
    Re {
        pattern: pattern.into(),
        replacement: None,
        count: 0,
        message: None,
        case_insensitive: false,
        multi_line: false,
        dot_matches_new_line: false,
        ignore_whitespace: false,
    }
}

impl Re {
    /// Return the string with matches replaced, instead of the original.
    ///
    /// Uses the `regex` crate's syntax: `$1`, `${name}`.  An empty
    /// replacement is the same as none: the input is returned unchanged.
    pub fn replacement<R: Into<String>>(mut self, replacement: R) -> Re {
        let replacement = replacement.into();
        self.replacement = if replacement.is_empty() {
            None
        } else {
            Some(replacement)
        };
        self
    }

    /// Limit the number of replacements.  Zero, the default, replaces every
    /// match.
    pub fn count(mut self, count: usize) -> Re {
        self.count = count;
        self
    }

    /// Use this text instead of `does not match /pattern/` on failure.
    pub fn message<M: Into<String>>(mut self, message: M) -> Re {
        self.message = Some(message.into());
        self
    }

    /// Same as `regex::RegexBuilder::case_insensitive`.
    pub fn case_insensitive(mut self, yes: bool) -> Re {
        self.case_insensitive = yes;
        self
    }

    /// `^` and `$` also match at line boundaries.  The match still has to
    /// begin at the start of the string.
    pub fn multi_line(mut self, yes: bool) -> Re {
        self.multi_line = yes;
        self
    }

    /// Let `.` match `\n`.
    pub fn dot_matches_new_line(mut self, yes: bool) -> Re {
        self.dot_matches_new_line = yes;
        self
    }

    /// Verbose mode: whitespace is ignored and `#` starts a comment.
    pub fn ignore_whitespace(mut self, yes: bool) -> Re {
        self.ignore_whitespace = yes;
        self
    }

    fn compile(&self, pattern: &str) -> CheckResult<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .build()
            .map_err(|e| CheckError::Structural(format!("bad pattern /{}/: {}", self.pattern, e)))
    }

    /// Compile the pattern and build the validator.
    pub fn build(self) -> CheckResult<Schema> {
        // `\A` anchors at the start of input even in multi-line mode.  In
        // verbose mode a trailing comment would swallow the closing paren,
        // so it goes on its own line.
        let anchored = if self.ignore_whitespace {
            format!("\\A(?:{}\n)", self.pattern)
        } else {
            format!("\\A(?:{})", self.pattern)
        };
        let anchored = self.compile(&anchored)?;
        let regex = self.compile(&self.pattern)?;

        let Re {
            pattern,
            replacement,
            count,
            message,
            ..
        } = self;
        let message = message.unwrap_or_else(|| format!("does not match /{}/", pattern));

        let validator = Validator::new(move |data, path| {
            let text = match data {
                Value::Text(t) => t,
                _ => {
                    return Err(invalid(
                        path,
                        format!("{} should be a string", subject(path)),
                    ))
                }
            };
            if !anchored.is_match(text) {
                let preview: String = text.chars().take(PREVIEW_LEN).collect();
                let msg = format!("{}(==\"{}\") {}", subject(path), preview, message);
                return Err(invalid(path, msg));
            }
            match &replacement {
                Some(r) => Ok(Value::Text(
                    regex.replacen(text, count, r.as_str()).into_owned(),
                )),
                None => Ok(data.clone()),
            }
        });
        Ok(validator.into())
    }
}

fn builtin(re: Re) -> Schema {
    // The built-in patterns are constants, so build() should never fail.
    re.build().expect("built-in pattern")
}

/// Matches an ISO 8601 date and time, e.g. `2016-12-01T09:34:34`.
pub fn iso8601_datetime() -> Schema {
    builtin(re(ISO8601_DATETIME))
}

/// Matches an ISO 8601 date, e.g. `2016-12-01`.
pub fn iso8601_date() -> Schema {
    builtin(re(ISO8601_DATE))
}

/// Matches an ISO 8601 time, e.g. `09:34:34.5`.
pub fn iso8601_time() -> Schema {
    builtin(re(ISO8601_TIME))
}

/// Matches base64-encoded text (standard alphabet, with padding).
pub fn base64() -> Schema {
    builtin(re(BASE64).message("is not base64"))
}
