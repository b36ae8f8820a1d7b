use alloc::string::{String, ToString};

use super::dtos::{ChildDto, CounterDto, EmptyDto, ReadWriteDto, RootDto};
use crate::hydrate::to_plain_tree;
use crate::value::{Mapping, ToValue, Value};
use crate::{Dto, mapping};

const ROOT_JSON: &str = r#"{
    "id": 10,
    "firstName": "John",
    "lastName": "Doe",
    "patronymic": "jr.",
    "data": { "foo": "bar" },
    "child": { "id": 20 },
    "subChild": null,
    "children": [{ "id": 40 }, { "id": 50 }],
    "foo": [{ "id": 60 }, { "id": 70 }],
    "fooBar": [{ "id": 80 }, { "id": 90 }],
    "readonly": { "foo": "gaz", "bar": "baz" },
    "readonlyArr": []
}"#;

fn json(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn serializes_in_field_order() {
    let child = ChildDto::from_mapping(mapping! { "id" => 20, "name" => "Joe" }).unwrap();
    assert_eq!(
        serde_json::to_string(&child).unwrap(),
        r#"{"id":20,"name":"JoeFoo"}"#
    );

    let empty = EmptyDto::from_mapping(Mapping::new()).unwrap();
    assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
}

#[test]
fn nested_tree_encodes_like_its_input() {
    let input: Mapping = serde_json::from_str(ROOT_JSON).unwrap();
    let root = RootDto::from_mapping(input).unwrap();

    let mut expected = json(ROOT_JSON);
    expected["child"]["name"] = serde_json::Value::Null;
    expected["children"][0]["name"] = serde_json::Value::Null;
    expected["children"][1]["name"] = serde_json::Value::Null;

    assert_eq!(serde_json::to_value(&root).unwrap(), expected);
}

#[test]
fn decode_then_encode_is_stable() {
    let root: RootDto = serde_json::from_str(ROOT_JSON).unwrap();
    let encoded: String = serde_json::to_string(&root).unwrap();

    let again: RootDto = serde_json::from_str(&encoded).unwrap();
    assert_eq!(serde_json::to_string(&again).unwrap(), encoded);
    assert_eq!(to_plain_tree(&again).unwrap(), to_plain_tree(&root).unwrap());
}

#[test]
fn decode_reports_construction_errors() {
    let err = serde_json::from_str::<ChildDto>(r#"{"id": "x"}"#).unwrap_err();
    assert!(err.to_string().contains("Invalid value"));

    assert!(serde_json::from_str::<ReadWriteDto>("[1, 2]").is_err());
}

#[test]
fn value_carries_objects_into_json() {
    let child = ChildDto::from_mapping(mapping! { "id" => 1 }).unwrap();
    let value = Value::Seq(alloc::vec![child.to_value(), Value::Int(2)]);
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"[{"id":1,"name":null},2]"#
    );
}

#[test]
fn unsigned_extremes_survive_json() {
    let counter = CounterDto {
        hits: u64::MAX,
        slots: alloc::vec![0, usize::MAX],
    };
    let text = serde_json::to_string(&counter).unwrap();
    assert_eq!(
        text,
        alloc::format!(r#"{{"hits":{},"slots":[0,{}]}}"#, u64::MAX, usize::MAX)
    );

    let decoded: CounterDto = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, counter);
}
