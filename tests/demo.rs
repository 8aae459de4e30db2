#![cfg(feature = "serde_json")]

use poorman_schema::{
    base64, check, decimal, iso8601_date, iso8601_datetime, iso8601_time, mandatory, mapping, or,
    re, strip, CheckError, Kind, Schema, Value,
};
use bigdecimal::BigDecimal;
use serde_json::json;
use std::convert::TryFrom;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn value(json: serde_json::Value) -> Value {
    Value::try_from(json).unwrap()
}

// A list of records, each with a mandatory "a" and a bunch of optional keys.
fn records() -> Schema {
    Schema::sequence(mapping! {
        "a" => mandatory(or![Kind::Null, Kind::Integer, or![strip(), iso8601_datetime()]]),
        "b" => Kind::Text,
        "c" => re("^a*$").build().unwrap(),
        "d" => iso8601_date(),
        "e" => iso8601_time(),
        "f" => base64(),
    })
}

fn check_err(data: serde_json::Value, schema: &Schema) -> String {
    let err = check(&value(data), schema).unwrap_err();
    assert!(err.is_invalid(), "unexpected error kind: {:?}", err);
    err.to_string()
}

#[test]
fn not_a_list() {
    init();
    assert_eq!(check_err(json!(1), &records()), "value should be a list");
}

#[test]
fn empty_list() {
    init();
    let out = check(&value(json!([])), &records()).unwrap();
    assert_eq!(out, Value::Array(vec![]));
}

#[test]
fn not_base64() {
    init();
    // "a" is missing too.
    assert_eq!(
        check_err(json!([{"f": "x"}]), &records()),
        r#"[0] keys(==f) are not a superset of a and [0]{f}(=="x") is not base64"#
    );
}

#[test]
fn valid_records() {
    init();
    for data in &[
        json!([{"a": 1}]),
        json!([{"a": null}]),
        json!([{"a": 1, "d": "1023-02-02", "e": "12:12:12"}]),
        json!([{"a": 1, "b": "x", "c": "aaa", "f": "aGVsbG8="}]),
    ] {
        let data = value(data.clone());
        assert_eq!(check(&data, &records()).unwrap(), data);
    }
}

#[test]
fn first_alternative_wins() {
    init();
    // strip is tried before the datetime pattern, and already succeeds.
    let data = value(json!([{"a": " 2016-12-01T09:34:34 "}]));
    let out = check(&data, &records()).unwrap();
    assert_eq!(out, value(json!([{"a": "2016-12-01T09:34:34"}])));
}

#[test]
fn independent_violations() {
    init();
    let err = check(&value(json!([{"a": 1, "b": 2, "c": "b"}])), &records()).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"[0]{b} should be of type "str" and [0]{c}(=="b") does not match /^a*$/"#
    );
    let paths: Vec<&str> = err
        .as_invalid()
        .unwrap()
        .violations()
        .iter()
        .map(|v| v.path())
        .collect();
    assert_eq!(paths, ["[0]{b}", "[0]{c}"]);
}

#[test]
fn missing_mandatory_key() {
    init();
    assert_eq!(
        check_err(json!([{"b": "x"}]), &records()),
        "[0] keys(==b) are not a superset of a"
    );
}

#[test]
fn unknown_key() {
    init();
    assert_eq!(
        check_err(json!([{"a": 1, "z": 0}]), &records()),
        "[0] keys(a, z) are not a subset of a, b, c, d, e, f"
    );
}

#[test]
fn failing_element() {
    init();
    assert_eq!(
        check_err(json!([{"a": 1}, {"a": true}]), &records()),
        concat!(
            r#"[1]{a} should be of type "null" or [1]{a} should be of type "int" or "#,
            r#"[1]{a} should be of type "str" or [1]{a} should be a string"#,
        )
    );
}

#[test]
fn decimal_text() {
    init();
    let out = check(&Value::from("1.3"), &decimal()).unwrap();
    assert_eq!(out, Value::Decimal("1.3".parse::<BigDecimal>().unwrap()));
    assert_eq!(out.to_string(), "1.3");

    let err = check(&Value::from("one point three"), &decimal()).unwrap_err();
    assert!(matches!(err, CheckError::Conversion(_)));
}
