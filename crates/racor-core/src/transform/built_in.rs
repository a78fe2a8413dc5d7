//! Built-in transforms and constructors
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

use super::types::{kind_of, NativeTransform, Transform};
use crate::error::{Error, Result};
use crate::path::Path;
use serde_json::Value;
use std::collections::BTreeMap;

/// Names registered by [`super::TransformRegistry::with_builtins`]
pub const BUILTIN_NAMES: [&str; 6] = ["identity", "length", "keys", "values", "first", "last"];

/// Pass values through unchanged
pub fn identity() -> Transform {
    Transform::Identity
}

/// `list -> list of item[property]`
pub fn pluck_transform(property: impl Into<String>) -> Transform {
    Transform::Pluck {
        property: property.into(),
    }
}

/// Always produce `value`
pub fn constant(value: Value) -> Transform {
    Transform::Constant { value }
}

/// Read `path` from the piped value
pub fn get(path: impl Into<Path>) -> Transform {
    Transform::Get { path: path.into() }
}

/// Apply `transform` to each element of an array
pub fn each(transform: Transform) -> Transform {
    Transform::Each {
        transform: Box::new(transform),
    }
}

/// Build an object from `(field, path)` pairs read off the piped value
pub fn field_map<I, K, P>(fields: I) -> Transform
where
    I: IntoIterator<Item = (K, P)>,
    K: Into<String>,
    P: Into<Path>,
{
    let fields: BTreeMap<String, Path> = fields
        .into_iter()
        .map(|(field, path)| (field.into(), path.into()))
        .collect();
    Transform::FieldMap { fields }
}

/// Chain transforms left to right
pub fn compose<I>(steps: I) -> Transform
where
    I: IntoIterator<Item = Transform>,
{
    let mut steps: Vec<Transform> = steps.into_iter().filter(|t| !t.is_identity()).collect();
    match steps.len() {
        0 => Transform::Identity,
        1 => steps.remove(0),
        _ => Transform::Compose { steps },
    }
}

/// Wrap a host closure
pub fn native<F>(name: impl Into<String>, func: F) -> Transform
where
    F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
{
    Transform::Native(NativeTransform::new(name, func))
}

/// The native function behind a built-in name
pub fn builtin(name: &str) -> Option<NativeTransform> {
    let native = match name {
        "identity" => NativeTransform::new(name, |value: &Value| Ok(value.clone())),
        "length" => NativeTransform::new(name, length),
        "keys" => NativeTransform::new(name, keys),
        "values" => NativeTransform::new(name, values),
        "first" => NativeTransform::new(name, |value: &Value| {
            Ok(expect_array("first", value)?.first().cloned().unwrap_or(Value::Null))
        }),
        "last" => NativeTransform::new(name, |value: &Value| {
            Ok(expect_array("last", value)?.last().cloned().unwrap_or(Value::Null))
        }),
        _ => return None,
    };
    Some(native)
}

fn length(value: &Value) -> Result<Value> {
    let len = match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(text) => text.chars().count(),
        other => {
            return Err(Error::runtime(
                "length",
                format!("cannot take the length of {}", kind_of(other)),
            ))
        }
    };
    Ok(Value::from(len))
}

fn keys(value: &Value) -> Result<Value> {
    let map = expect_object("keys", value)?;
    Ok(Value::Array(map.keys().cloned().map(Value::String).collect()))
}

fn values(value: &Value) -> Result<Value> {
    let map = expect_object("values", value)?;
    Ok(Value::Array(map.values().cloned().collect()))
}

fn expect_array<'a>(name: &str, value: &'a Value) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::runtime(name, format!("expected an array, found {}", kind_of(value))))
}

fn expect_object<'a>(name: &str, value: &'a Value) -> Result<&'a serde_json::Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::runtime(name, format!("expected an object, found {}", kind_of(value))))
}
