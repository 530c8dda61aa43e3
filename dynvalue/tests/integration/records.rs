//! Records declared with `record!`: field order, bases, lenient decoding.

use dynvalue::{
    Depth, ErrorKind, FromVariant, PathSegment, Reflect, VObject, Value, from_value,
    from_value_into, record, to_value,
};
use dynvalue_testhelpers::{IPanic, test};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, PartialEq)]
struct Entity {
    id: u64,
}

record!(Entity { id });

#[derive(Debug, Default, Clone, PartialEq)]
struct Timestamps {
    created: i64,
    updated: Option<i64>,
}

record!(Timestamps { created, updated });

#[derive(Debug, Default, Clone, PartialEq)]
struct User {
    entity: Entity,
    stamps: Timestamps,
    name: String,
    roles: Vec<String>,
    prefs: HashMap<String, bool>,
    manager: Option<Box<User>>,
}

record!(User: entity, stamps { name, roles, prefs, manager });

fn alice() -> User {
    User {
        entity: Entity { id: 1 },
        stamps: Timestamps {
            created: 100,
            updated: Some(200),
        },
        name: "alice".into(),
        roles: vec!["admin".into()],
        prefs: HashMap::from([("dark".into(), true)]),
        manager: Some(Box::new(User {
            entity: Entity { id: 0 },
            name: "root".into(),
            ..User::default()
        })),
    }
}

fn keys(v: &Value) -> Vec<&str> {
    v.get_object().unwrap().keys().map(String::as_str).collect()
}

#[test]
fn bases_come_first_in_listed_order() {
    let v = to_value(&alice()).unwrap();
    assert_eq!(
        keys(&v),
        ["id", "created", "updated", "name", "roles", "prefs", "manager"]
    );
    assert_eq!(alice().field_names(), keys(&v));
}

#[test]
fn nested_records_roundtrip() -> Result<(), IPanic> {
    let user = alice();
    let v = to_value(&user)?;
    assert_eq!(from_value::<User>(&v)?, user);
    let manager = v.get("manager")?;
    assert_eq!(manager.get("name")?.get_string()?, "root");
    assert!(manager.get("manager")?.is_null());
    Ok(())
}

#[test]
fn base_fields_decode_from_the_flat_object() {
    let input = Value::from(VObject::new().with("id", 9).with("created", 5).with("name", "bob"));
    let user: User = from_value(&input).unwrap();
    assert_eq!(user.entity.id, 9);
    assert_eq!(user.stamps.created, 5);
    assert_eq!(user.stamps.updated, None);
    assert_eq!(user.name, "bob");
}

#[test]
fn update_in_place_keeps_unmentioned_fields() {
    let mut user = alice();
    let patch = Value::from(
        VObject::new()
            .with("updated", Value::NULL)
            .with("roles", vec![Value::from("ops"), Value::from("dev")]),
    );
    from_value_into(&patch, &mut user, Depth::default()).unwrap();
    assert_eq!(user.stamps.updated, None);
    assert_eq!(user.roles, ["ops", "dev"]);
    assert_eq!(user.name, "alice");
    assert_eq!(user.entity.id, 1);
    assert!(user.manager.is_some());
}

#[test]
fn nested_update_reaches_through_the_box() {
    let mut user = alice();
    let patch = Value::from(VObject::new().with("manager", VObject::new().with("name", "boss")));
    user.update_from_variant(&patch, Depth::default()).unwrap();
    let manager = user.manager.as_deref().unwrap();
    assert_eq!(manager.name, "boss");
    assert_eq!(manager.entity.id, 0);
}

#[test]
fn unknown_keys_are_skipped() {
    let input = Value::from(VObject::new().with("nickname", "al").with("id", 3));
    let user: User = from_value(&input).unwrap();
    assert_eq!(user.entity.id, 3);
}

#[test]
fn errors_name_the_field_path() {
    let input = Value::from(
        VObject::new().with("prefs", vec![Value::from(vec![Value::from("dark"), Value::from("maybe")])]),
    );
    let err = from_value::<User>(&input).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ConversionFailure { target: "bool", .. }));
    assert_eq!(
        err.path,
        [
            PathSegment::Field("prefs".into()),
            PathSegment::Index(0),
            PathSegment::Index(1)
        ]
    );
    assert!(err.to_string().starts_with("at .prefs[0][1]: "));
}

#[test]
fn non_object_input_is_a_type_mismatch() {
    let err = from_value::<Entity>(&Value::from(vec![Value::from(1)])).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { expected: "object", .. }));
}
