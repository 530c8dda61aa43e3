//! Encode-then-decode across the supported type families.

use dynvalue::{Blob, Depth, FromVariant, ToVariant, Value, alternatives, from_value, to_value};
use dynvalue_testhelpers::{IPanic, test};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

fn roundtrip<T: ToVariant + FromVariant + PartialEq + Debug>(original: T) {
    let encoded = to_value(&original).unwrap();
    let decoded: T = from_value(&encoded).unwrap();
    assert_eq!(decoded, original, "through {encoded}");
}

#[test]
fn scalars() {
    roundtrip(true);
    roundtrip(i8::MIN);
    roundtrip(i64::MAX);
    roundtrip(u64::MAX);
    roundtrip(usize::MAX);
    roundtrip(-0.25f32);
    roundtrip(f64::MAX);
    roundtrip('λ');
    roundtrip(String::from("hello \"world\""));
    roundtrip(());
    roundtrip(Blob::from(vec![0u8, 255, 10]));
    roundtrip(u128::MAX);
    roundtrip(u128::from(u64::MAX) + 1);
    roundtrip(i128::MIN);
    roundtrip(-42i128);
}

#[test]
fn optional_and_pointers() {
    roundtrip(Some(5u8));
    roundtrip(None::<String>);
    roundtrip(Box::new(vec![1, 2]));
    roundtrip(Some(Box::new(String::from("boxed"))));
    roundtrip(None::<Box<i32>>);
    roundtrip(Rc::new(7));
    roundtrip(Arc::new(vec![String::from("shared")]));
}

#[test]
fn tuples_and_fixed_arrays() {
    roundtrip((1, String::from("a")));
    roundtrip((1u8, -2i16, 3.5f64));
    roundtrip((true, 'x', 0u64, String::new()));
    roundtrip([1u16, 2, 3]);
}

#[test]
fn ordered_collections() {
    roundtrip(vec![vec![1], vec![], vec![2, 3]]);
    roundtrip(VecDeque::from([1.5, 2.5]));
    roundtrip(LinkedList::from(['a', 'b']));
    roundtrip(BTreeSet::from([3, 1, 2]));
    roundtrip(BTreeMap::from([(1, String::from("one")), (2, String::from("two"))]));
    roundtrip(vec![(String::from("k"), 1), (String::from("k"), 2)]);
}

#[test]
fn unordered_collections() {
    roundtrip(HashSet::from([String::from("x"), String::from("y")]));
    roundtrip(HashMap::from([(1u8, vec![true]), (2u8, vec![])]));
    roundtrip(indexmap::IndexMap::<String, i32>::from_iter([
        (String::from("b"), 2),
        (String::from("a"), 1),
    ]));
}

// Struct-like variants go through a record.
#[derive(Debug, Clone, Default, PartialEq)]
struct Card {
    number: String,
}

dynvalue::record!(Card { number });

#[derive(Debug, Clone, PartialEq)]
enum Method {
    Cash(u64),
    Card(Card),
    Split(Vec<Method>),
    Unknown(()),
}

alternatives!(Method {
    Cash(u64),
    Card(Card),
    Split(Vec<Method>),
    Unknown(()),
});

#[test]
fn enums() {
    roundtrip(Method::Cash(12));
    roundtrip(Method::Card(Card {
        number: "4111".into(),
    }));
    roundtrip(Method::Split(vec![Method::Cash(1), Method::Unknown(())]));
    roundtrip(vec![Some(Method::Cash(0)), None]);
}

#[test]
fn dynamic_values_pass_through() -> Result<(), IPanic> {
    let tree: Value = [("a", Value::from(vec![Value::from(1), Value::NULL]))]
        .into_iter()
        .collect();
    let nested = vec![tree.clone(), Value::from("s")];
    let encoded = Value::encode(&nested, Depth::new(1))?;
    let back: Vec<Value> = encoded.decode(Depth::new(1))?;
    assert_eq!(back, nested);
    Ok(())
}

#[test]
fn sequence_encoding_keeps_order() {
    let v = to_value(&vec![1, 2, 3]).unwrap();
    assert_eq!(v.to_string(), "[1,2,3]");
    let list: VecDeque<i32> = from_value(&v).unwrap();
    assert_eq!(list, [1, 2, 3]);
}
