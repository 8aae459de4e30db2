use poorman_schema::{
    check, date_with, mandatory, mapping, CheckResult, Kind, Schema, TemporalParser, Timestamp,
    Value,
};
use chrono::{NaiveDate, NaiveTime};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

// Counts calls, so we can tell when the parser is used.
#[derive(Default)]
struct CountingParser {
    dates: AtomicUsize,
}

impl TemporalParser for CountingParser {
    fn parse_datetime(&self, _s: &str) -> CheckResult<Timestamp> {
        unimplemented!()
    }

    fn parse_date(&self, s: &str) -> CheckResult<NaiveDate> {
        self.dates.fetch_add(1, Ordering::SeqCst);
        poorman_schema::ChronoParser.parse_date(s)
    }

    fn parse_time(&self, _s: &str) -> CheckResult<NaiveTime> {
        unimplemented!()
    }
}

fn schema(parser: Arc<CountingParser>) -> Schema {
    mapping! {
        "id" => mandatory(Kind::Integer),
        "born" => date_with(parser),
    }
}

fn record(id: i64, born: Option<&str>) -> Value {
    let mut m = std::collections::BTreeMap::new();
    m.insert("id".to_string(), Value::from(id));
    if let Some(born) = born {
        m.insert("born".to_string(), Value::from(born));
    }
    Value::Map(m)
}

#[test]
fn parser_runs_only_when_needed() {
    let parser = Arc::new(CountingParser::default());
    let schema = schema(parser.clone());

    check(&record(1, None), &schema).unwrap();
    assert_eq!(parser.dates.load(Ordering::SeqCst), 0);

    // The pattern rejects this before the parser sees it.
    check(&record(2, Some("soon")), &schema).unwrap_err();
    assert_eq!(parser.dates.load(Ordering::SeqCst), 0);

    let out = check(&record(3, Some("1999-12-31")), &schema).unwrap();
    assert_eq!(parser.dates.load(Ordering::SeqCst), 1);
    match out {
        Value::Map(m) => assert_eq!(
            m["born"],
            Value::Date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap())
        ),
        other => panic!("expected a map, got {:?}", other),
    }
}

#[test]
fn schema_shared_between_threads() {
    let parser = Arc::new(CountingParser::default());
    let schema = Arc::new(schema(parser.clone()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let born = format!("200{}-01-01", i);
                check(&record(i, Some(&born)), &schema).unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(parser.dates.load(Ordering::SeqCst), 4);
}
