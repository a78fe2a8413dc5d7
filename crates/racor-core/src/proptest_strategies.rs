//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random trees,
//! paths and specs for property testing.

#![cfg(test)]

use crate::path::{Path, Segment, MAX_INDEX};
use crate::spec::Spec;
use crate::transform::{pluck_transform, Transform};
use proptest::collection::{hash_map, vec};
use proptest::option;
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for generating JSON scalars, including the falsy ones
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::from(0)),
        Just(Value::from("")),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for generating object keys that never parse as indices,
/// including digit-only keys with a leading zero or beyond the index cap
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
        1 => "0[0-9]{1,4}",
        1 => "[1-9][0-9]{5,22}",
    ]
}

/// Strategy for generating indices too large to address array positions
pub fn oversized_index_strategy() -> impl Strategy<Value = usize> {
    (MAX_INDEX + 1)..=usize::MAX
}

/// Strategy for generating nested trees with controlled depth
pub fn tree_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(
        3,  // max depth
        24, // max size
        4,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(Value::Array),
                hash_map(key_strategy(), inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating path segments with small indices
pub fn segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        3 => key_strategy().prop_map(Segment::Key),
        1 => (0usize..4).prop_map(Segment::Index),
    ]
}

/// Strategy for generating non-empty paths
pub fn path_strategy() -> impl Strategy<Value = Path> {
    vec(segment_strategy(), 1..5).prop_map(Path::from_segments)
}

/// Strategy for generating paths as strings in mixed notation
pub fn path_string_strategy() -> impl Strategy<Value = String> {
    path_strategy().prop_map(|path| path.to_string())
}

/// Strategy for generating transforms that cannot fail at runtime
pub fn infallible_transform_strategy() -> impl Strategy<Value = Option<Transform>> {
    option::of(prop_oneof![
        Just(Transform::Identity),
        scalar_strategy().prop_map(|value| Transform::Constant { value }),
        path_strategy().prop_map(|path| Transform::Get { path }),
    ])
}

/// Strategy for generating specs whose transforms cannot fail
pub fn spec_strategy() -> impl Strategy<Value = Spec> {
    (
        path_strategy(),
        path_strategy(),
        infallible_transform_strategy(),
        option::of(scalar_strategy()),
    )
        .prop_map(|(source, destination, transform, fallback)| Spec {
            source,
            destination,
            transform: transform.map(Into::into),
            fallback,
        })
}

/// Strategy for generating lists of things with ids, for pluck tests
pub fn id_list_strategy() -> impl Strategy<Value = (Value, Vec<i64>)> {
    vec(any::<i64>(), 0..6).prop_map(|ids| {
        let items = ids.iter().map(|id| serde_json::json!({ "id": id })).collect();
        (Value::Array(items), ids)
    })
}

/// The pluck transform used alongside [`id_list_strategy`]
pub fn id_plucker() -> Transform {
    pluck_transform("id")
}
