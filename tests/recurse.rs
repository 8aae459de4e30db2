use poorman_schema::{check, Kind, Schema, Value};
use ntest::timeout;

#[test]
#[timeout(5000)] // 5 seconds
fn test_recursion() {
    let mut schema = Schema::from(Kind::Integer);
    let mut data = Value::from(1);
    for _ in 0..22 {
        schema = Schema::sequence(schema);
        data = Value::Array(vec![data]);
    }
    assert_eq!(check(&data, &schema).unwrap(), data);

    let mut schema = Schema::from(Kind::Integer);
    let mut data = Value::from(1);
    for _ in 0..22 {
        schema = poorman_schema::mapping! { "k" => schema };
        data = Value::Map(vec![("k".to_string(), data)].into_iter().collect());
    }
    assert_eq!(check(&data, &schema).unwrap(), data);
}
