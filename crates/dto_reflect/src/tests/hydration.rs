use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::dtos::foo::FooDto;
use super::dtos::{
    ChildDto, LooseDto, PersonDto, PortDto, ReadonlyDto, RootDto, StrictDto, TaggedDto,
};
use crate::error::{DtoError, FieldAccess, ValueError};
use crate::hydrate::to_plain_tree;
use crate::value::{Mapping, Value};
use crate::{Dto, DynDto, mapping};

fn root_input() -> Mapping {
    mapping! {
        "lastName" => "Doe",
        "id" => 10,
        "firstName" => "John",
        "patronymic" => "jr.",
        "data" => mapping! { "foo" => "bar" },
        "child" => mapping! { "id" => 20, "name" => Value::Null },
        "subChild" => Value::Null,
        "children" => vec![
            Value::Map(mapping! { "id" => 40, "name" => Value::Null }),
            Value::Map(mapping! { "id" => 50, "name" => Value::Null }),
        ],
        "foo" => vec![
            Value::Map(mapping! { "id" => 60 }),
            Value::Map(mapping! { "id" => 70 }),
        ],
        "fooBar" => vec![
            Value::Map(mapping! { "id" => 80 }),
            Value::Map(mapping! { "id" => 90 }),
        ],
        "readonly" => mapping! { "foo" => "gaz", "bar" => "baz" },
        "readonlyArr" => vec![
            Value::Map(mapping! { "foo" => "gaz", "bar" => "baz" }),
            Value::Map(mapping! { "foo" => "gaz1", "bar" => "baz1" }),
        ],
    }
}

// -----------------------------------------------------------------------------
// Field list

#[test]
fn field_list_is_stable_and_ordered() {
    let first = RootDto::field_names();
    let _ = RootDto::from_mapping(root_input()).unwrap();
    let again = RootDto::field_names();

    assert!(core::ptr::eq(first, again));
    assert_eq!(
        first,
        [
            "lastName",
            "id",
            "firstName",
            "patronymic",
            "data",
            "child",
            "subChild",
            "children",
            "foo",
            "fooBar",
            "readonly",
            "readonlyArr",
        ]
    );
}

#[test]
fn virtual_getters_count_and_hidden_slots_do_not() {
    assert_eq!(PersonDto::field_names(), ["fullName", "first", "last", "title"]);

    let person = PersonDto::from_mapping(mapping! {
        "first" => "Ada",
        "last" => "Lovelace",
        "secret" => "x",
        "_cache" => "warm",
    })
    .unwrap();

    assert_eq!(person.get("fullName").unwrap(), Value::from("Ada Lovelace"));
    assert!(person.has_field("fullName"));
    assert!(!person.has_field("_cache"));
    assert!(!person.has_field("scratch"));
    // private slot: skipped on write, unknown on read
    assert_eq!(person.secret(), "");
    assert!(person.get("secret").is_err());
    // `_`-prefixed slots are still writable
    assert_eq!(person._cache.as_deref(), Some("warm"));
}

// -----------------------------------------------------------------------------
// Construction

#[test]
fn nested_tree_is_hydrated() {
    let sub_child = ChildDto::from_mapping(mapping! { "id" => 30 }).unwrap();
    let mut input = root_input();
    input.insert("subChild", Value::Object(Box::new(sub_child.clone())));

    let root = RootDto::from_mapping(input).unwrap();

    assert_eq!(root.id, 10);
    assert_eq!(root.first_name, "John");
    assert_eq!(root.last_name(), "Doe");
    assert_eq!(root.data, Value::Map(mapping! { "foo" => "bar" }));
    assert_eq!(root.child.id, 20);
    assert_eq!(root.sub_child.as_ref(), Some(&sub_child));
    assert_eq!(
        root.children.iter().map(|c| c.id).collect::<Vec<_>>(),
        [40, 50]
    );
    assert_eq!(root.foo, [FooDto { id: 60 }, FooDto { id: 70 }]);
    assert_eq!(
        root.readonly,
        Some(ReadonlyDto {
            foo: "gaz".into(),
            bar: "baz".into(),
        })
    );
    assert_eq!(root.readonly_arr[1].bar, "baz1");

    let foo_bar = root.foo_bar.as_seq().unwrap();
    assert_eq!(foo_bar.len(), 2);
    #[cfg(feature = "auto_register")]
    assert_eq!(foo_bar[1].as_dto::<FooDto>(), Some(&FooDto { id: 90 }));
}

#[test]
fn child_setter_runs_during_hydration() {
    let root = RootDto::from_mapping(mapping! {
        "child" => mapping! { "id" => 20, "name" => "Joe" },
    })
    .unwrap();
    assert_eq!(root.child.id, 20);
    assert_eq!(root.child.name.as_deref(), Some("JoeFoo"));

    let tree = to_plain_tree(&root).unwrap();
    assert_eq!(
        tree.get("child"),
        Some(&Value::Map(mapping! { "id" => 20, "name" => "JoeFoo" }))
    );
}

#[test]
fn empty_name_leaves_child_untouched() {
    let child = ChildDto::from_mapping(mapping! { "id" => 20, "name" => "" }).unwrap();
    assert_eq!(child.name, None);

    let mut child = ChildDto::from_mapping(mapping! { "id" => 20, "name" => "Joe" }).unwrap();
    crate::hydrate::hydrate_into(&mut child, mapping! { "name" => "" }).unwrap();
    assert_eq!(child.name.as_deref(), Some("JoeFoo"));
}

#[test]
fn plain_tree_round_trips() {
    let input = root_input();
    let root = RootDto::from_mapping(input.clone()).unwrap();
    assert_eq!(to_plain_tree(&root).unwrap(), input);

    let foo = mapping! { "id" => 5 };
    assert_eq!(to_plain_tree(&FooDto::from_mapping(foo.clone()).unwrap()).unwrap(), foo);
}

#[test]
fn plain_mapping_keeps_nested_objects() {
    let root = RootDto::from_mapping(root_input()).unwrap();
    let plain = root.to_plain_mapping().unwrap();

    let child = plain.get("child").and_then(Value::as_dto::<ChildDto>).unwrap();
    assert_eq!(child.id, 20);
    assert_eq!(child.get("name").unwrap(), Value::Null);
    assert_eq!(plain.get("subChild"), Some(&Value::Null));
}

#[test]
fn nested_failure_names_the_outer_field() {
    let err = RootDto::from_mapping(mapping! {
        "child" => mapping! { "id" => "twenty" },
    })
    .unwrap_err();

    let DtoError::InvalidValue { field, source, .. } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(field, "child");
    let ValueError::Construct(inner) = source else {
        panic!("unexpected source: {source:?}");
    };
    assert_eq!(inner.field(), "id");
}

#[test]
fn ghost_keys_follow_the_policy() {
    let child = ChildDto::from_mapping(mapping! { "id" => 1, "ghost" => 2 }).unwrap();
    assert!(!child.has_field("ghost"));
    let err = child.get("ghost").unwrap_err();
    assert!(matches!(err, DtoError::UnknownField { access: FieldAccess::Read, .. }));

    let err = StrictDto::from_mapping(mapping! { "id" => 1, "ghost" => 2 }).unwrap_err();
    assert_eq!(err.field(), "ghost");
}

#[test]
fn positional_fills_in_declaration_order() {
    // Keys are ignored; only the order counts.
    let dto = ReadonlyDto::from_mapping(mapping! { "b" => "first", "a" => "second", "c" => "extra" })
        .unwrap();
    assert_eq!(dto.foo, "first");
    assert_eq!(dto.bar, "second");

    let err = ReadonlyDto::from_mapping(mapping! { "foo" => "only" }).unwrap_err();
    assert!(matches!(err, DtoError::InvalidValue { .. }));
    assert_eq!(err.field(), "bar");
}

#[test]
fn mapping_constructor_receives_everything() {
    let dto = TaggedDto::from_mapping(mapping! { "tag" => "x", "a" => 1, "b" => true }).unwrap();
    assert_eq!(dto.tag, "x");
    assert_eq!(dto.extra, mapping! { "a" => 1, "b" => true });

    assert!(TaggedDto::from_mapping(mapping! { "tag" => 3 }).is_err());
}

#[test]
fn unresolvable_hint_keeps_raw_value() {
    let raw = Value::Seq(vec![Value::Map(mapping! { "id" => 1 })]);
    let dto = LooseDto::from_mapping(mapping! { "ghosts" => raw.clone() }).unwrap();
    assert_eq!(dto.ghosts, raw);
}

#[cfg(feature = "auto_register")]
#[test]
fn hinted_values_are_constructed() {
    let dto = LooseDto::from_mapping(mapping! {
        "child" => mapping! { "id" => 3, "name" => "Al" },
        "children" => mapping! {
            "z" => mapping! { "id" => 1 },
            "a" => mapping! { "id" => 2 },
        },
    })
    .unwrap();

    let child = dto.child.as_dto::<ChildDto>().unwrap();
    assert_eq!(child.name.as_deref(), Some("AlFoo"));

    let children = dto.children.as_map().unwrap();
    assert_eq!(children.keys().collect::<Vec<_>>(), ["z", "a"]);
    assert_eq!(children.get("a").and_then(|v| v.as_dto::<ChildDto>()).map(|c| c.id), Some(2));
}

// -----------------------------------------------------------------------------
// Mutation

#[test]
fn public_setter_wins_over_slot() {
    let mut person = PersonDto::from_mapping(mapping! { "title" => "Dr" }).unwrap();
    assert_eq!(person.title, "Dr.");

    person.set("title", "Prof").unwrap();
    assert_eq!(person.get("title").unwrap(), Value::from("Prof."));

    // public slot, no setter
    let err = person.set("first", "Ada").unwrap_err();
    assert!(matches!(err, DtoError::UnknownField { access: FieldAccess::Write, .. }));
    assert_eq!(person.first, "");
}

#[test]
fn setter_errors_are_reported() {
    let err = PortDto::from_mapping(mapping! { "port" => 0 }).unwrap_err();
    assert!(matches!(
        err,
        DtoError::InvalidValue { source: ValueError::OutOfRange { .. }, .. }
    ));

    let mut dto = PortDto::from_mapping(mapping! { "port" => 8080 }).unwrap();
    assert!(dto.set("port", 0).is_err());
    assert!(dto.set("port", "eighty").is_err());
    assert_eq!(dto.port, 8080);
}

#[test]
fn dyn_access_matches_typed_access() {
    let child = ChildDto::from_mapping(mapping! { "id" => 7, "name" => "Bo" }).unwrap();
    let boxed: Box<dyn DynDto> = Box::new(child);

    assert!(boxed.is::<ChildDto>());
    assert_eq!(boxed.fields(), ["id", "name"]);
    assert_eq!(boxed.get("name").unwrap(), Value::from("BoFoo"));

    let name: String = match boxed.downcast::<ChildDto>() {
        Ok(child) => child.name.unwrap_or_default(),
        Err(_) => panic!("downcast failed"),
    };
    assert_eq!(name, "BoFoo");
}
