//! Tests for the deep path extractor.

use super::*;
use serde_json::json;

#[test]
fn test_parse_splits_on_dots() {
    let path = SeedPath::parse("a.b.c");
    assert_eq!(path.segments(), ["a", "b", "c"]);
    assert_eq!(path.to_string(), "a.b.c");
}

#[test]
fn test_empty_string_is_empty_path() {
    assert!(SeedPath::parse("").is_empty());
    assert!(SeedPath::from(Vec::<String>::new()).is_empty());
}

#[test]
fn test_segments_may_contain_dots() {
    let value = json!({ "example.com": { "port": 8080 } });
    let path = SeedPath::new(["example.com", "port"]);

    assert_eq!(extract(&value, &path).unwrap(), &json!(8080));
}

#[test]
fn test_extract_nested_leaf() {
    let value = json!({ "a": { "b": { "c": 42 } } });
    let leaf = extract(&value, &SeedPath::from("a.b.c")).unwrap();
    assert_eq!(leaf, &json!(42));
}

#[test]
fn test_extract_returns_subtree() {
    let value = json!({ "a": { "b": { "c": 42 } } });
    let subtree = extract(&value, &SeedPath::from("a.b")).unwrap();
    assert_eq!(subtree, &json!({ "c": 42 }));
}

#[test]
fn test_extract_empty_path_returns_whole_value() {
    let value = json!({ "a": [1, 2, 3] });
    let whole = extract(&value, &SeedPath::default()).unwrap();
    assert_eq!(whole, &value);
}

#[test]
fn test_extract_missing_segment_reports_walked_path() {
    let value = json!({ "a": { "b": { "c": 42 } } });
    let error = extract(&value, &SeedPath::from("a.x")).unwrap_err();

    match error {
        SeedError::NotFound(msg) => assert_eq!(msg, "property value \"a.x\""),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_extract_stops_at_first_gap() {
    let value = json!({ "a": { "b": 1 } });
    let error = extract(&value, &SeedPath::from("a.missing.deeper.still")).unwrap_err();

    assert_eq!(
        error.to_string(),
        "Not found: property value \"a.missing\""
    );
}

#[test]
fn test_extract_through_scalar_fails() {
    let value = json!({ "a": 5 });
    let error = extract(&value, &SeedPath::from("a.b")).unwrap_err();
    assert_eq!(error.to_string(), "Not found: property value \"a.b\"");
}

#[test]
fn test_extract_through_null_fails() {
    let value = json!({ "a": null });
    assert!(extract(&value, &SeedPath::from("a.b")).is_err());
    // null itself is still an owned property
    assert_eq!(extract(&value, &SeedPath::from("a")).unwrap(), &Value::Null);
}

#[test]
fn test_extract_array_index() {
    let value = json!({ "users": [{ "id": 1 }, { "id": 2 }] });
    let id = extract(&value, &SeedPath::from("users.1.id")).unwrap();
    assert_eq!(id, &json!(2));
}

#[test]
fn test_extract_array_rejects_non_canonical_index() {
    let value = json!({ "users": [{ "id": 1 }, { "id": 2 }] });
    assert!(extract(&value, &SeedPath::from("users.01.id")).is_err());
    assert!(extract(&value, &SeedPath::from("users.5")).is_err());
    assert!(extract(&value, &SeedPath::from("users.first")).is_err());
}
