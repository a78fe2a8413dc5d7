//! Specs exchanged as JSON documents
//!
//! Only the serializable subset of transforms is available here: bodies,
//! `[args, body]` pairs, `{args, body}` objects and compiled transforms.

use racor_core::{
    apply, from_path_map_value, EngineConfig, Error, Racor, ResolutionMode, SpecSet,
};
use serde_json::{json, Value};

fn input() -> Value {
    json!({
        "posts": [{"id": 1414, "title": "pipi"}, {"id": 11, "title": "pipi 2"}],
        "comments": [{"id": 16}, {"id": 17}],
        "flags": {"draft": false, "count": 0, "note": ""}
    })
}

#[test]
fn test_spec_list_document() {
    let specs = SpecSet::from_json_str(
        r#"[
            {"src": "posts", "dst": "schema.properties.post.enum", "pipe": ["posts", "posts[*].id"]},
            {"src": "comments", "dst": "schema.properties.comment.enum", "pipe": {"pluck": {"property": "id"}}},
            {"src": "missing", "dst": "schema.properties.missing.default", "fallback": "empty"}
        ]"#,
    )
    .unwrap();

    let out = apply(&specs, &input(), None).unwrap();
    assert_eq!(
        out,
        json!({
            "schema": {
                "properties": {
                    "post": {"enum": [1414, 11]},
                    "comment": {"enum": [16, 17]},
                    "missing": {"default": "empty"}
                }
            }
        })
    );
}

#[test]
fn test_falsy_values_survive_the_trip() {
    let specs = SpecSet::from_value(json!([
        {"source": "flags.draft", "destination": "out.draft", "fallback": "x"},
        {"source": "flags.count", "destination": "out.count", "fallback": "x"},
        {"source": "flags.note", "destination": "out.note", "fallback": "x"}
    ]))
    .unwrap();
    let out = apply(&specs, &input(), None).unwrap();
    assert_eq!(out["out"], json!({"draft": false, "count": 0, "note": ""}));
}

#[test]
fn test_malformed_body_in_document() {
    let specs = SpecSet::from_value(json!({
        "src": "posts[0].title",
        "dst": "title",
        "pipe": "return posts.map(p => p.id)"
    }))
    .unwrap();

    let out = Racor::new().run(&specs, &input(), None).unwrap();
    assert_eq!(out["title"], "pipi");

    let strict = Racor::new().with_config(EngineConfig::default().with_resolution(ResolutionMode::Strict));
    assert!(matches!(
        strict.run(&specs, &input(), None),
        Err(Error::TransformConstruction { .. })
    ));
}

#[test]
fn test_invalid_transform_shape_in_document() {
    let specs = SpecSet::from_value(json!({"src": "posts[1].id", "dst": "id", "pipe": 42})).unwrap();
    let out = apply(&specs, &input(), None).unwrap();
    assert_eq!(out["id"], 11);
}

#[test]
fn test_path_map_document() {
    let map = json!({"posts[0].title": "first", "posts[1].title": "second"});
    let specs = from_path_map_value(&map, None).unwrap();
    let out = apply(&specs, &input(), None).unwrap();
    assert_eq!(out, json!({"first": "pipi", "second": "pipi 2"}));
}

#[test]
fn test_spec_list_serializes_back() {
    let document = json!([
        {"source": "posts", "destination": "ids", "transform": "value[*].id"},
        {"source": "a", "destination": "b", "fallback": 0}
    ]);
    let specs = SpecSet::from_value(document.clone()).unwrap();
    assert_eq!(serde_json::to_value(&specs).unwrap(), document);
}

#[test]
fn test_bad_document_is_a_spec_format_error() {
    let err = SpecSet::from_json_str(r#"[{"src": "a"}]"#).unwrap_err();
    assert!(matches!(err, Error::SpecFormat { .. }));
}
