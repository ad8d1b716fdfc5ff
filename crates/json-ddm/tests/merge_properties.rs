//! Universal merge invariants, exercised over assorted fixtures and key
//! vocabularies.

use json_ddm::{merge, MergeOptions};
use serde_json::{json, Value};

fn opts() -> MergeOptions {
    MergeOptions::default()
}

fn merged(base: &Value, over: &Value, options: &MergeOptions) -> Value {
    merge(Some(base), Some(over), options).unwrap().unwrap()
}

/// Asserts no object anywhere in `v` carries one of the reserved entries.
fn assert_no_control_keys(v: &Value, options: &MergeOptions) {
    match v {
        Value::Object(map) => {
            assert!(!map.contains_key(&options.position_key), "leaked in {v}");
            assert!(!map.contains_key(&options.anchor_key), "leaked in {v}");
            assert!(!map.contains_key(&options.patch_key), "leaked in {v}");
            for child in map.values() {
                assert_no_control_keys(child, options);
            }
        }
        Value::Array(items) => {
            for item in items {
                assert_no_control_keys(item, options);
            }
        }
        _ => {}
    }
}

#[test]
fn identity_absent_override_is_absent() {
    let base = json!({"a": [1, {"b": 2}]});
    assert_eq!(merge(Some(&base), None, &opts()).unwrap(), None);
}

#[test]
fn identity_empty_override_clones_base() {
    for base in [
        json!({}),
        json!({"a": 1, "b": {"c": [1, 2, {"$id": "x"}]}}),
        json!({"z": null}),
    ] {
        assert_eq!(merged(&base, &json!({}), &opts()), base);
    }
}

#[test]
fn primitive_override_always_wins() {
    let bases = [json!({"a": 1}), json!([1, 2]), json!("s"), json!(null), json!(7)];
    let prims = [json!(42), json!("new"), json!(true), json!(1.5)];
    for base in &bases {
        for p in &prims {
            assert_eq!(&merged(base, p, &opts()), p);
        }
    }
}

#[test]
fn wrapper_extraction_ignores_siblings() {
    let inner = json!({"deep": [1, {"x": 2}]});
    let over = json!({
        "$value": inner.clone(),
        "$position": "start",
        "$anchor": "whatever",
        "other": "ignored"
    });
    for base in [json!({"a": 1}), json!([1]), json!(5)] {
        assert_eq!(merged(&base, &over, &opts()), inner);
    }
}

#[test]
fn delete_erases_and_leaves_order_alone() {
    let base = json!({"one": 1, "two": 2, "three": 3, "four": 4});
    let out = merged(&base, &json!({"two": {"$patch": "delete"}}), &opts());
    let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["one", "three", "four"]);
    assert_eq!(out, json!({"one": 1, "three": 3, "four": 4}));
}

#[test]
fn control_keys_never_leak() {
    let base = json!({
        "obj": {"a": 1},
        "arr": [{"$id": "x", "n": 1}, {"$id": "y"}]
    });
    let over = json!({
        "obj": {"a": {"$position": "end"}, "b": {"$position": "start"}},
        "arr": [
            {"$id": "x", "$position": "end", "n": 2},
            {"$id": "z", "$position": "before", "$anchor": "y"}
        ],
        "fresh": {"$patch": "not-delete", "inner": 1}
    });
    let out = merged(&base, &over, &opts());
    assert_no_control_keys(&out, &opts());
}

#[test]
fn escape_round_trip() {
    let base = json!({"kept": true});
    let over = json!({"$$position": {"x": 1}, "$$id": "literal"});
    let out = merged(&base, &over, &opts());
    assert_eq!(
        out,
        json!({"kept": true, "$position": {"x": 1}, "$id": "literal"})
    );
}

#[test]
fn array_identity_sets_combine() {
    let base = json!([{"$id": "a", "n": 1}, {"$id": "b"}, {"$id": "c"}]);
    let over = json!([
        {"$id": "b", "$patch": "delete"},
        {"$id": "a", "m": 2},
        {"$id": "d"}
    ]);
    let out = merged(&base, &over, &opts());
    let ids: Vec<_> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["$id"].as_str().unwrap().to_owned())
        .collect();
    // (base ∪ override) − deleted, base order first, appends last
    assert_eq!(ids, ["a", "c", "d"]);
    assert_eq!(out[0], json!({"$id": "a", "n": 1, "m": 2}));
}

#[test]
fn last_in_wins_for_scalars() {
    let base = json!({"k": 1});
    let o1 = json!({"k": 2});
    let o2 = json!({"k": 3});
    let step = merged(&base, &o1, &opts());
    let out = merged(&step, &o2, &opts());
    assert_eq!(out, json!({"k": 3}));
}

#[test]
fn merge_is_deterministic() {
    let base = json!({
        "a": {"nested": [1, 2, {"$id": "q", "v": true}]},
        "list": [{"$id": "m"}, {"$id": "n"}]
    });
    let over = json!({
        "a": {"nested": [{"$id": "q", "v": false}]},
        "list": [{"$id": "n", "$position": "start"}, {"extra": 1}]
    });
    let first = merged(&base, &over, &opts());
    let second = merged(&base, &over, &opts());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn non_prefixed_id_key_disables_escaping() {
    let plain = MergeOptions {
        id_key: "id".to_owned(),
        ..MergeOptions::default()
    };
    // doubled-dollar keys are ordinary data under an alphanumeric id key
    let out = merged(&json!({}), &json!({"$$patch": 1}), &plain);
    assert_eq!(out, json!({"$$patch": 1}));
    // and array identity uses the configured key
    let out = merged(
        &json!([{"id": "a", "n": 1}]),
        &json!([{"id": "a", "n": 2}]),
        &plain,
    );
    assert_eq!(out, json!([{"id": "a", "n": 2}]));
}

#[test]
fn custom_vocabulary_full_pipeline() {
    let custom = MergeOptions {
        id_key: "@id".to_owned(),
        position_key: "@pos".to_owned(),
        anchor_key: "@ref".to_owned(),
        patch_key: "@op".to_owned(),
        value_key: "@val".to_owned(),
        ..MergeOptions::default()
    };
    let base = json!({
        "widgets": [{"@id": "w1", "size": 1}, {"@id": "w2"}],
        "title": "old"
    });
    let over = json!({
        "widgets": [
            {"@id": "w2", "@pos": "start"},
            {"@id": "w1", "@op": "delete"}
        ],
        "title": {"@val": {"text": "new"}},
        "@@id": "escaped"
    });
    let out = merged(&base, &over, &custom);
    assert_eq!(
        out,
        json!({
            "widgets": [{"@id": "w2"}],
            "title": {"text": "new"},
            "@id": "escaped"
        })
    );
    assert_no_control_keys(&out, &custom);
}
