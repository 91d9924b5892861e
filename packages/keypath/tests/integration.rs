#![cfg(feature = "serde")]

use collection_literals::btree;
use serde_json::json;

use keypath::serde::{json_to_value, value_to_json};
use keypath::{
    at, collection, compile, compile_value, get, get_or, has, has_in, set, unset, update, Path,
    Predicate, Segment, Shorthand, Value,
};

fn tree(json: serde_json::Value) -> Value {
    json_to_value(json)
}

// ==================== compiler ====================

#[test]
fn compile_mixed_notation() {
    let path = Path::parse("a.b[0].c");
    assert_eq!(
        path.segments(),
        &[
            Segment::key("a"),
            Segment::key("b"),
            Segment::index(0),
            Segment::key("c"),
        ]
    );
    assert_eq!(Path::parse("a.b[0].c"), path);
    assert_eq!(Path::from_segments(["a", "b"]).child(0usize).child("c"), path);
}

#[test]
fn string_and_list_paths_address_the_same_value() {
    let data = tree(json!({"a": {"b": [{"c": 3}]}}));
    assert_eq!(get(&data, "a.b[0].c"), Some(&Value::Integer(3)));
    assert_eq!(get(&data, ["a", "b", "0", "c"]), Some(&Value::Integer(3)));
    assert_eq!(get(&data, "a.b.0.c"), Some(&Value::Integer(3)));
    assert_eq!(
        get(&data, vec![Segment::key("a"), Segment::key("b"), Segment::index(0)]),
        get(&data, "a.b[0]")
    );
}

#[test]
fn dynamic_path_values() {
    let data = tree(json!({"a": [10, 20]}));
    let raw = tree(json!(["a", 1]));
    let path = Path::try_from(&raw).unwrap();
    assert_eq!(get(&data, &path), Some(&Value::Integer(20)));

    assert!(Path::try_from(&tree(json!({"a": 1}))).is_err());
}

// ==================== readers ====================

#[test]
fn missing_links_are_not_errors() {
    let data = tree(json!({"a": {"b": 1}, "s": "text"}));
    assert_eq!(get(&data, "a.x.y"), None);
    assert_eq!(get(&data, "s.length"), None);
    assert_eq!(get(&data, "a.b.c"), None);
    assert_eq!(get(&Value::Null, "a"), None);

    let fallback = Value::from("default");
    assert_eq!(get_or(&data, "a.x", &fallback), &fallback);
    assert_eq!(get_or(&data, "a.b", &fallback), &Value::Integer(1));
}

#[test]
fn stored_null_is_present() {
    let data = tree(json!({"a": null}));
    let fallback = Value::from("default");
    assert_eq!(get(&data, "a"), Some(&Value::Null));
    assert_eq!(get_or(&data, "a", &fallback), &Value::Null);
    assert!(has(&data, "a"));
    assert!(!has_in(&data, "a"));
}

#[test]
fn has_and_has_in_diverge_on_falsy_values() {
    let data = tree(json!({"a": 0}));
    assert!(has(&data, "a"));
    assert!(!has_in(&data, "a"));

    let data = tree(json!({"a": {"b": false, "c": "", "d": [], "e": {}}}));
    assert!(has(&data, "a.b"));
    assert!(!has_in(&data, "a.b"));
    assert!(!has_in(&data, "a.c"));
    assert!(has_in(&data, "a.d"));
    assert!(has_in(&data, "a.e"));
}

#[test]
fn has_fails_on_the_first_missing_link() {
    let data = tree(json!({"a": [{"b": 1}]}));
    assert!(has(&data, "a[0].b"));
    assert!(!has(&data, "a[1].b"));
    assert!(!has(&data, "a.b"));
    assert!(has(&data, ""));
}

#[test]
fn read_several_paths() {
    let data = tree(json!({"a": [{"b": {"c": 3}}, 4]}));
    assert_eq!(
        at(&data, ["a[0].b.c", "a[1]", "a[2]"]),
        vec![Some(&Value::Integer(3)), Some(&Value::Integer(4)), None]
    );
}

// ==================== writers ====================

#[test]
fn set_creates_containers_by_lookahead() {
    let mut data = Value::map();
    set(&mut data, "a.b.0", Value::from("x"));
    assert_eq!(value_to_json(data), json!({"a": {"b": ["x"]}}));

    let mut data = Value::map();
    set(&mut data, ["x", "0", "y"], Value::Integer(1));
    assert_eq!(value_to_json(data), json!({"x": [{"y": 1}]}));
}

#[test]
fn set_preserves_existing_containers() {
    let mut data = tree(json!({"a": {"keep": true}}));
    set(&mut data, "a.b", Value::Integer(2));
    assert_eq!(value_to_json(data), json!({"a": {"keep": true, "b": 2}}));
}

#[test]
fn set_coerces_scalars_in_the_way() {
    let mut data = tree(json!({"a": 5}));
    set(&mut data, "a.b[1]", Value::from("y"));
    assert_eq!(value_to_json(data), json!({"a": {"b": [null, "y"]}}));
}

#[test]
fn set_returns_the_same_root() {
    let mut data = Value::map();
    set(&mut data, "a", Value::Integer(1));
    let len = set(&mut data, "b", Value::Integer(2))
        .as_map()
        .map(|m| m.len());
    assert_eq!(len, Some(2));
}

#[test]
fn update_sees_the_previous_value() {
    let mut data = tree(json!({"counter": {"hits": 1}}));
    let increment = |current: Option<&Value>| {
        Value::Integer(current.and_then(Value::as_i64).unwrap_or(0) + 1)
    };

    update(&mut data, "counter.hits", increment);
    update(&mut data, "counter.misses", increment);
    assert_eq!(value_to_json(data), json!({"counter": {"hits": 2, "misses": 1}}));
}

// ==================== deleter ====================

#[test]
fn unset_removes_the_leaf() {
    let original = tree(json!({"a": {"b": 1}}));

    let mut data = original.clone();
    assert!(unset(&mut data, "a.b"));
    assert_eq!(value_to_json(data), json!({"a": {}}));

    let mut data = original.clone();
    assert!(!unset(&mut data, "x.y"));
    assert_eq!(data, original);
}

#[test]
fn unset_array_elements_shift() {
    let mut data = tree(json!({"list": ["a", "b", "c"]}));
    assert!(unset(&mut data, "list[0]"));
    assert_eq!(value_to_json(data), json!({"list": ["b", "c"]}));
}

#[test]
fn unset_stops_at_falsy_intermediates() {
    let mut data = tree(json!({"a": 0, "b": {"c": 1}}));
    assert!(!unset(&mut data, "a.b"));
    assert!(unset(&mut data, "b.missing"));
    assert!(!unset(&mut data, ""));
    assert_eq!(value_to_json(data), json!({"a": 0, "b": {"c": 1}}));
}

// ==================== predicates ====================

#[test]
fn predicate_shapes() {
    let object = tree(json!({"a": 1, "b": 2}));
    assert!(compile(btree! { "a".to_string() => Value::Integer(1) }).test(&object));
    assert!(compile(("a", 1i64)).test(&tree(json!({"a": 1}))));
    assert_eq!(
        compile("a.b").call(&tree(json!({"a": {"b": 5}}))),
        Value::Integer(5)
    );

    let function = Predicate::from_test(|v| has(v, "b"));
    assert!(compile(function).test(&object));
}

#[test]
fn predicates_from_dynamic_values() {
    let object = tree(json!({"a": 1, "b": {"c": [7]}}));
    assert!(compile_value(tree(json!({"a": 1}))).unwrap().test(&object));
    assert!(compile_value(tree(json!(["a", 1]))).unwrap().test(&object));
    assert_eq!(
        compile_value(tree(json!("b.c[0]"))).unwrap().call(&object),
        Value::Integer(7)
    );
    assert!(compile_value(tree(json!(true))).is_err());
}

#[test]
fn partial_match_is_loose() {
    let object = tree(json!({"n": 3, "tags": ["x"]}));
    assert!(compile(btree! { "n".to_string() => Value::Float(3.0) }).test(&object));
    assert!(compile(("tags", tree(json!(["x"])))).test(&object));
    assert!(!compile(("tags", tree(json!(["y"])))).test(&object));
}

#[test]
fn collection_helpers_share_one_predicate_contract() {
    let users = tree(json!([
        {"user": "barney", "age": 36, "active": true},
        {"user": "fred", "age": 40, "active": false},
        {"user": "pebbles", "age": 1, "active": true}
    ]));

    let shorthands: Vec<Shorthand> = vec![
        Shorthand::from("active"),
        Shorthand::from(btree! { "active".to_string() => Value::Bool(true) }),
        Shorthand::from(("active", true)),
        Shorthand::function(|v| get(v, "active").cloned().unwrap_or_default()),
    ];
    for shorthand in shorthands {
        let kind = shorthand.kind();
        let found = collection::filter(&users, shorthand);
        let names: Vec<_> = found
            .iter()
            .filter_map(|u| get(u, "user").and_then(Value::as_str))
            .collect();
        assert_eq!(names, ["barney", "pebbles"], "{} shorthand", kind);
    }

    assert_eq!(
        collection::map(&users, "user"),
        vec![Value::from("barney"), Value::from("fred"), Value::from("pebbles")]
    );
    assert_eq!(collection::count_by(&users, "active")["true"], 2);
}
