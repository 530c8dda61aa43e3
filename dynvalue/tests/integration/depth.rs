//! The recursion budget: a structure nested `D` levels deep converts with a
//! budget of `D` and fails with `D - 1`.

use dynvalue::{
    DEFAULT_MAX_DEPTH, Depth, ErrorKind, FromVariant, PathSegment, ToVariant, VObject, Value,
    alternatives, from_value, from_value_with_depth, record, to_value_with_depth,
};
use dynvalue_testhelpers::test;
use std::collections::{BTreeMap, HashSet};

fn assert_exact_depth<T: ToVariant + FromVariant + std::fmt::Debug>(value: &T, levels: u32) {
    let encoded = to_value_with_depth(value, Depth::new(levels)).unwrap();
    from_value_with_depth::<T>(&encoded, Depth::new(levels)).unwrap();

    let err = to_value_with_depth(value, Depth::new(levels - 1)).unwrap_err();
    assert!(err.is_recursion_limit(), "encode at {}: {err}", levels - 1);
    let err = from_value_with_depth::<T>(&encoded, Depth::new(levels - 1)).unwrap_err();
    assert!(err.is_recursion_limit(), "decode at {}: {err}", levels - 1);
}

#[derive(Debug, Default, PartialEq)]
struct Node {
    label: String,
    children: Vec<Node>,
}

record!(Node { label, children });

fn chain(levels: usize) -> Node {
    let mut node = Node {
        label: "leaf".into(),
        children: vec![],
    };
    for i in 0..levels {
        node = Node {
            label: format!("n{i}"),
            children: vec![node],
        };
    }
    node
}

#[test]
fn containers_spend_one_level_each() {
    assert_exact_depth(&vec![1, 2, 3], 1);
    assert_exact_depth(&vec![vec![vec![1u8]]], 3);
    assert_exact_depth(&Some(Some(5)), 2);
    assert_exact_depth(&Some(Box::new(Some(Box::new(1)))), 2);
    assert_exact_depth(&(1, vec![2]), 2);
    assert_exact_depth(&HashSet::from([1]), 1);
}

#[test]
fn pointers_are_free_and_options_pay() {
    assert!(to_value_with_depth(&Box::new(Box::new(1)), Depth::new(0)).is_ok());
    assert_exact_depth(&Some(Box::new(1)), 1);
    assert_exact_depth(&std::rc::Rc::new(vec![1]), 1);
}

#[derive(Debug, PartialEq)]
enum Tree {
    Leaf(i32),
    Branch(Vec<Tree>),
}

alternatives!(Tree { Leaf(i32), Branch(Vec<Tree>) });

#[test]
fn alternatives_spend_one_level_for_the_pair() {
    assert_exact_depth(&Tree::Leaf(1), 1);
    // pair, vector, inner pair
    assert_exact_depth(&Tree::Branch(vec![Tree::Leaf(1)]), 3);
    assert_exact_depth(&Tree::Branch(vec![Tree::Branch(vec![])]), 4);
}

#[test]
fn wide_integers_are_leaves() {
    assert!(to_value_with_depth(&u128::MAX, Depth::new(0)).is_ok());
    assert_exact_depth(&vec![i128::MIN], 1);
}

#[test]
fn maps_spend_a_level_for_the_entry_pair() {
    assert_exact_depth(&BTreeMap::from([(1, 2)]), 2);
    assert_exact_depth(&BTreeMap::from([(1, vec![2])]), 3);
}

#[test]
fn records_spend_one_level() {
    // record, children vector, child record, its empty children vector
    assert_exact_depth(&chain(1), 4);
    assert_exact_depth(&chain(10), 22);
}

#[test]
fn empty_containers_still_cost_a_level() {
    assert!(to_value_with_depth(&Vec::<i32>::new(), Depth::new(0)).is_err());
    assert!(to_value_with_depth(&Vec::<i32>::new(), Depth::new(1)).is_ok());
}

#[test]
fn failure_reports_the_starting_budget() {
    let err = to_value_with_depth(&vec![vec![1]], Depth::new(1)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RecursionLimitExceeded { budget: Some(1) });
    assert_eq!(err.path_string(), "[0]");
}

#[test]
fn hostile_nesting_is_rejected() {
    // Far deeper than the default budget allows.
    let mut v = Value::from(VObject::new().with("label", "leaf"));
    for _ in 0..600 {
        v = Value::from(VObject::new().with("children", vec![v]));
    }
    let err = from_value::<Node>(&v).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::RecursionLimitExceeded {
            budget: Some(DEFAULT_MAX_DEPTH)
        }
    );
    assert_eq!(
        err.path[..2],
        [PathSegment::Field("children".into()), PathSegment::Index(0)]
    );
}

#[test]
fn deep_typed_chain_fails_on_encode() {
    let mut boxed: Option<Box<Node>> = None;
    for _ in 0..100 {
        boxed = Some(Box::new(Node {
            label: String::new(),
            children: boxed.into_iter().map(|b| *b).collect(),
        }));
    }
    let err = to_value_with_depth(&boxed, Depth::new(50)).unwrap_err();
    assert!(err.is_recursion_limit());
}

#[test]
fn default_depth_is_the_builtin_limit() {
    // No test in this binary installs a default.
    assert_eq!(Depth::default().remaining(), DEFAULT_MAX_DEPTH);
}
