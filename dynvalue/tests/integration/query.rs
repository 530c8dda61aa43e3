//! Read-side API: predicates, coercions, keyed and indexed access, visitors.

use dynvalue::{Blob, ErrorKind, VObject, Value, ValueType, Visitor};
use dynvalue_testhelpers::{IPanic, test};
use std::collections::BTreeSet;

fn document() -> Value {
    Value::from(
        VObject::new()
            .with("name", "widget")
            .with("count", 3u32)
            .with("price", 9.5)
            .with("tags", vec![Value::from("a"), Value::from("b")])
            .with("blob", Blob::from(vec![1u8, 2, 3])),
    )
}

#[test]
fn navigation() -> Result<(), IPanic> {
    let doc = document();
    assert_eq!(doc.get("name")?.get_string()?, "widget");
    assert_eq!(doc.get("tags")?.at(1)?.get_string()?, "b");
    assert_eq!(doc.get("tags")?.size()?, 2);
    assert_eq!(doc.get("blob")?.get_blob()?.as_slice(), [1u8, 2, 3]);
    Ok(())
}

#[test]
fn access_errors_are_reported() {
    let doc = document();
    assert_eq!(
        doc.get("missing").unwrap_err().kind,
        ErrorKind::MissingKey {
            key: "missing".into()
        }
    );
    let tags = doc.get("tags").unwrap();
    assert_eq!(
        tags.at(5).unwrap_err().kind,
        ErrorKind::IndexOutOfRange { index: 5, len: 2 }
    );
    assert_eq!(
        tags.get("x").unwrap_err().kind,
        ErrorKind::TypeMismatch {
            expected: "object",
            got: ValueType::Array
        }
    );
}

#[test]
fn mutation_through_accessors() -> Result<(), IPanic> {
    let mut doc = document();
    *doc.get_mut("count")? = Value::from(4u32);
    doc.get_mut("tags")?.get_array_mut()?.push(Value::from("c"));
    doc.get_object_mut()?.insert("extra", true);
    doc.get_mut("tags")?.at_mut(0)?.get_string_mut()?.push('!');
    assert_eq!(doc.get("count")?.as_uint64()?, 4);
    assert_eq!(doc.get("tags")?.to_string(), r#"["a!","b","c"]"#);
    assert!(doc.get("extra")?.as_bool()?);
    Ok(())
}

#[test]
fn coercions() -> Result<(), IPanic> {
    let doc = document();
    assert_eq!(doc.get("price")?.as_int64()?, 9);
    assert_eq!(doc.get("count")?.as_double()?, 3.0);
    assert_eq!(doc.get("count")?.as_string()?, "3");
    assert_eq!(doc.get("blob")?.as_string()?, "AQID");
    assert!(doc.get("tags")?.as_int64().is_err());
    assert!(doc.as_string().is_err());
    Ok(())
}

#[test]
fn mixed_values_sort_by_type_then_value() {
    let set: BTreeSet<Value> = [
        Value::from("b"),
        Value::from(2),
        Value::NULL,
        Value::from(1.0),
        Value::from("a"),
        Value::from(1),
        Value::from(1u64),
    ]
    .into_iter()
    .collect();
    let rendered: Vec<String> = set.iter().map(Value::to_string).collect();
    assert_eq!(rendered, ["null", "1", "2", "1", "1.0", "\"a\"", "\"b\""]);
}

#[test]
fn arithmetic() -> Result<(), IPanic> {
    let doc = document();
    let total = (doc.get("price")? * doc.get("count")?)?;
    assert_eq!(total, Value::Double(28.5));
    assert!((doc.get("name")? + doc.get("count")?).is_err());
    Ok(())
}

/// Collects every string reachable from a value.
struct Strings(Vec<String>);

impl Visitor for Strings {
    type Output = ();

    fn visit_null(&mut self) {}
    fn visit_i64(&mut self, _: i64) {}
    fn visit_u64(&mut self, _: u64) {}
    fn visit_f64(&mut self, _: f64) {}
    fn visit_bool(&mut self, _: bool) {}
    fn visit_str(&mut self, v: &str) {
        self.0.push(v.to_owned());
    }
    fn visit_array(&mut self, items: &[Value]) {
        for item in items {
            item.visit(self);
        }
    }
    fn visit_object(&mut self, obj: &VObject) {
        for (key, val) in obj {
            self.0.push(key.clone());
            val.visit(self);
        }
    }
}

#[test]
fn visitor_walks_the_tree() {
    let mut strings = Strings(vec![]);
    document().visit(&mut strings);
    assert_eq!(
        strings.0,
        ["name", "widget", "count", "price", "tags", "a", "b", "blob", "AQID"]
    );
}
