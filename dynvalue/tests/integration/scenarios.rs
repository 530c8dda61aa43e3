//! End-to-end behaviours of the conversion protocol.

use dynvalue::{Depth, ErrorKind, VObject, Value, ValueType, from_value, from_value_into, record, to_value};
use dynvalue_testhelpers::test;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: char,
}

impl Default for Point {
    fn default() -> Self {
        Point { x: 1, y: 'a' }
    }
}

record!(Point { x, y });

#[test]
fn ordered_sequence_encodes_as_array() {
    let v = to_value(&vec![1, 2, 3]).unwrap();
    assert_eq!(v.value_type(), ValueType::Array);
    assert_eq!(v, [1, 2, 3].into_iter().collect::<Value>());
    assert_eq!(from_value::<Vec<i32>>(&v).unwrap(), [1, 2, 3]);
}

#[test]
fn record_encodes_and_decodes_leniently() {
    let v = to_value(&Point::default()).unwrap();
    assert_eq!(v, Value::from(VObject::new().with("x", 1).with("y", "a")));

    let partial = Value::from(VObject::new().with("x", 5));
    assert_eq!(from_value::<Point>(&partial).unwrap(), Point { x: 5, y: 'a' });
}

#[test]
fn unordered_map_ignores_entry_order() {
    let map = HashMap::from([(String::from("a"), 1)]);
    let v = to_value(&map).unwrap();
    assert_eq!(v.to_string(), r#"[["a",1]]"#);

    let forward = Value::from(vec![
        Value::from(vec![Value::from("a"), Value::from(1)]),
        Value::from(vec![Value::from("b"), Value::from(2)]),
    ]);
    let backward = Value::from(vec![
        Value::from(vec![Value::from("b"), Value::from(2)]),
        Value::from(vec![Value::from("a"), Value::from(1)]),
    ]);
    let lhs: HashMap<String, i32> = from_value(&forward).unwrap();
    let rhs: HashMap<String, i32> = from_value(&backward).unwrap();
    assert_eq!(lhs, rhs);
    assert_eq!(lhs.len(), 2);

    // Re-encoding may reorder; compare as sets of entries.
    let reencoded = to_value(&lhs).unwrap();
    let mut entries = reencoded.get_array().unwrap().to_vec();
    entries.sort();
    let mut expected = forward.get_array().unwrap().to_vec();
    expected.sort();
    assert_eq!(entries, expected);
}

#[test]
fn bad_field_fails_and_leaves_record_unchanged() {
    let mut point = Point::default();
    let input = Value::from(VObject::new().with("x", "not-a-number"));
    let err = from_value_into(&input, &mut point, Depth::default()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::ConversionFailure { .. } | ErrorKind::TypeMismatch { .. }
    ));
    assert_eq!(err.path_string(), ".x");
    assert_eq!(point, Point::default());
}

#[test]
fn null_propagation() {
    assert!(Value::default().is_null());
    assert!(to_value(&None::<Box<Point>>).unwrap().is_null());
    assert_eq!(from_value::<Option<Point>>(&Value::NULL).unwrap(), None);
    assert!(from_value::<Option<Box<Point>>>(&Value::NULL).unwrap().is_none());
}

#[test]
fn footprint_is_constant() {
    let values = [
        Value::NULL,
        Value::from(u64::MAX),
        Value::from("heap"),
        Value::from(vec![Value::NULL; 32]),
        Value::from(VObject::new().with("k", 1)),
    ];
    for v in &values {
        assert_eq!(std::mem::size_of_val(v), std::mem::size_of::<Value>());
    }
    #[cfg(target_pointer_width = "64")]
    assert_eq!(std::mem::size_of::<Value>(), 16);
}

#[test]
fn move_leaves_null_and_copy_is_deep() {
    let mut original = Value::from(vec![Value::from("a")]);
    let copy = original.clone();
    let moved = original.take();
    assert!(original.is_null());
    assert_eq!(moved, copy);
}
