//! Tree building and deep merge
//!
//! Every function here borrows its inputs and returns a freshly built tree,
//! so callers may keep using (and aliasing) the originals.
//!
//! Merge rules:
//! - object + object: union of keys, shared keys merged recursively
//! - array + array: merged by index, overlapping positions merged
//!   recursively, the longer side's tail kept
//! - anything else: the overlay wins
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

use crate::path::{Path, Segment};
use serde_json::{Map, Value};

/// Build the smallest tree holding `value` at `path`.
///
/// Index segments produce arrays just long enough for the index, with the
/// lower positions left as `null` holes. Indices above [`MAX_INDEX`](crate::path::MAX_INDEX) build an
/// object member named by their digits instead.
pub fn build_singleton(path: &Path, value: &Value) -> Value {
    path.segments()
        .iter()
        .rev()
        .fold(value.clone(), |inner, segment| match segment.array_index() {
            Some(index) => {
                let mut items = vec![Value::Null; index];
                items.push(inner);
                Value::Array(items)
            }
            None => {
                let mut map = Map::new();
                map.insert(segment.as_key(), inner);
                Value::Object(map)
            }
        })
}

/// Deep-merge `overlay` on top of `base`.
pub fn merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let value = match base_map.get(key) {
                    Some(base_value) => merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            let len = base_items.len().max(overlay_items.len());
            let merged = (0..len)
                .filter_map(|position| {
                    match (base_items.get(position), overlay_items.get(position)) {
                        (Some(b), Some(o)) => Some(merge(b, o)),
                        (Some(b), None) => Some(b.clone()),
                        (None, Some(o)) => Some(o.clone()),
                        (None, None) => None,
                    }
                })
                .collect();
            Value::Array(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Merge `value` into `output` at `path`.
///
/// Equivalent to `merge(output, build_singleton(path, value))` except that
/// the singleton's holes are treated as absent: array positions the path does
/// not address keep whatever `output` had there.
pub fn write(output: &Value, path: &Path, value: &Value) -> Value {
    write_segments(Some(output), path.segments(), value)
}

fn write_segments(base: Option<&Value>, segments: &[Segment], value: &Value) -> Value {
    let Some((segment, rest)) = segments.split_first() else {
        return match base {
            Some(existing) => merge(existing, value),
            None => value.clone(),
        };
    };

    match segment.array_index() {
        Some(index) => {
            let mut items = match base {
                Some(Value::Array(existing)) => existing.clone(),
                _ => Vec::new(),
            };
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            let child = write_segments(items.get(index), rest, value);
            items[index] = child;
            Value::Array(items)
        }
        None => {
            let key = segment.as_key();
            let mut map = match base {
                Some(Value::Object(existing)) => existing.clone(),
                _ => Map::new(),
            };
            let child = write_segments(map.get(&key), rest, value);
            map.insert(key, child);
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::MAX_INDEX;
    use serde_json::json;

    #[test]
    fn test_build_singleton_objects() {
        let tree = build_singleton(&Path::parse("a.b.c"), &json!("pepito"));
        assert_eq!(tree, json!({"a": {"b": {"c": "pepito"}}}));
    }

    #[test]
    fn test_build_singleton_arrays_with_holes() {
        let tree = build_singleton(&Path::parse("list[2].id"), &json!(7));
        assert_eq!(tree, json!({"list": [null, null, {"id": 7}]}));
    }

    #[test]
    fn test_build_singleton_root() {
        assert_eq!(build_singleton(&Path::root(), &json!(1)), json!(1));
    }

    #[test]
    fn test_merge_objects_keeps_siblings() {
        let base = json!({"schema": {"properties": {"posts": {"title": "Sarasa"}}}});
        let overlay = json!({"schema": {"properties": {"post": {"enum": [1]}}}});
        let merged = merge(&base, &overlay);
        assert_eq!(merged["schema"]["properties"]["posts"]["title"], "Sarasa");
        assert_eq!(merged["schema"]["properties"]["post"]["enum"], json!([1]));
    }

    #[test]
    fn test_merge_arrays_by_index_never_truncates() {
        let base = json!([{"a": 1}, 2, 3]);
        let overlay = json!([{"b": 2}]);
        assert_eq!(merge(&base, &overlay), json!([{"a": 1, "b": 2}, 2, 3]));

        let longer = json!([9, 9, 9, 9]);
        assert_eq!(merge(&base, &longer), json!([9, 9, 9, 9]));
    }

    #[test]
    fn test_merge_type_conflicts_overlay_wins() {
        assert_eq!(merge(&json!({"a": 1}), &json!([1])), json!([1]));
        assert_eq!(merge(&json!([1]), &json!("x")), json!("x"));
        assert_eq!(merge(&json!("x"), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(merge(&json!({"a": {"b": 1}}), &json!({"a": null})), json!({"a": null}));
    }

    #[test]
    fn test_merge_does_not_mutate() {
        let base = json!({"a": {"b": [1, 2]}});
        let overlay = json!({"a": {"b": [3], "c": true}});
        let (base_before, overlay_before) = (base.clone(), overlay.clone());
        let _ = merge(&base, &overlay);
        assert_eq!(base, base_before);
        assert_eq!(overlay, overlay_before);
    }

    #[test]
    fn test_write_into_empty() {
        let out = write(&json!({}), &Path::parse("a.b[1]"), &json!(true));
        assert_eq!(out, json!({"a": {"b": [null, true]}}));
    }

    #[test]
    fn test_write_holes_keep_existing_elements() {
        let output = json!({"list": ["x", "y", "z"]});
        let out = write(&output, &Path::parse("list[1]"), &json!("Y"));
        assert_eq!(out, json!({"list": ["x", "Y", "z"]}));
    }

    #[test]
    fn test_write_deep_merges_object_values() {
        let output = json!({"a": {"x": 1}});
        let out = write(&output, &Path::parse("a"), &json!({"y": 2}));
        assert_eq!(out, json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_write_replaces_conflicting_containers() {
        let output = json!({"a": "scalar", "b": {"k": 1}});
        let out = write(&output, &Path::parse("a.c"), &json!(1));
        assert_eq!(out["a"], json!({"c": 1}));
        let out = write(&output, &Path::parse("b[0]"), &json!(1));
        assert_eq!(out["b"], json!([1]));
    }

    #[test]
    fn test_write_root_merges_whole_output() {
        let out = write(&json!({"a": 1}), &Path::root(), &json!({"b": 2}));
        assert_eq!(out, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_write_at_oversized_index_builds_member() {
        let out = write(&json!({}), &Path::parse("out[18446744073709551615]"), &json!(1));
        assert_eq!(out, json!({"out": {"18446744073709551615": 1}}));

        let out = write(&json!({}), &Path::parse("out[100000000000]"), &json!(1));
        assert_eq!(out, json!({"out": {"100000000000": 1}}));
    }

    #[test]
    fn test_directly_built_huge_index_does_not_allocate() {
        let path = Path::from_segments(vec![Segment::Key("out".into()), Segment::Index(usize::MAX)]);
        let mut member = Map::new();
        member.insert(usize::MAX.to_string(), json!(true));
        let expected = json!({"out": Value::Object(member)});
        assert_eq!(write(&json!({}), &path, &json!(true)), expected);
        assert_eq!(build_singleton(&path, &json!(true)), expected);
    }

    #[test]
    fn test_write_at_largest_index() {
        let out = write(&json!([]), &Path::from_segments(vec![Segment::Index(MAX_INDEX)]), &json!(1));
        let items = out.as_array().unwrap();
        assert_eq!(items.len(), MAX_INDEX + 1);
        assert_eq!(items[MAX_INDEX], json!(1));
    }

    #[test]
    fn test_write_matches_merge_of_singleton_on_empty() {
        let path = Path::parse("a[2].b.c[0]");
        let value = json!("v");
        assert_eq!(
            write(&json!({}), &path, &value),
            merge(&json!({}), &build_singleton(&path, &value))
        );
    }
}
