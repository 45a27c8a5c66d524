use serde::{Deserialize, Serialize};
use serde_json::json;
use infection_utils::{compress_obj, decompress_obj, dejsonify, jsonify, load_json};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Settings {
    zeta: u32,
    alpha: String,
    nested: Vec<Nested>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Nested {
    y: u8,
    b: u8,
}

#[test]
fn test_jsonify_sorts_keys() {
    let settings = Settings {
        zeta: 1,
        alpha: "a".to_string(),
        nested: vec![Nested { y: 2, b: 3 }],
    };
    assert_eq!(
        jsonify(&settings).unwrap(),
        r#"{"alpha":"a","nested":[{"b":3,"y":2}],"zeta":1}"#
    );
}

#[test]
fn test_jsonify_is_stable_for_equal_values() {
    let a = json!({"b": 1, "a": {"d": 2, "c": 3}});
    let b = json!({"a": {"c": 3, "d": 2}, "b": 1});
    assert_eq!(jsonify(&a).unwrap(), jsonify(&b).unwrap());
}

#[test]
fn test_compressed_object_restores() {
    let settings = Settings {
        zeta: 42,
        alpha: "population".to_string(),
        nested: vec![],
    };
    let compressed = compress_obj(&settings).unwrap();
    let restored: Settings = decompress_obj(&compressed).unwrap();
    assert_eq!(restored, settings);
}

#[test]
fn test_load_json_inline() {
    let nested: Nested = load_json(r#"{"y": 5, "b": 6}"#).unwrap();
    assert_eq!(nested, Nested { y: 5, b: 6 });
}

#[test]
fn test_load_json_missing_file() {
    assert!(load_json::<Nested>("/definitely/not/here.json").is_err());
}

#[test]
fn test_dejsonify_rejects_garbage() {
    assert!(dejsonify::<Nested>("{not json").is_err());
}
