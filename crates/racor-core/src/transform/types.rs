//! Core types for the transform system
//!
//! [`Transform`] is the closed set of unary operations a spec can apply to the
//! value it reads. [`TransformSource`] is what a caller (or a JSON document)
//! hands in before resolution.
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::path::{Path, Segment};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Signature of host-supplied transform functions
pub type TransformFn = dyn Fn(&Value) -> Result<Value> + Send + Sync;

/// A named host closure
#[derive(Clone)]
pub struct NativeTransform {
    name: String,
    func: Arc<TransformFn>,
}

impl NativeTransform {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, value: &Value) -> Result<Value> {
        (self.func)(value)
    }
}

impl fmt::Debug for NativeTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeTransform")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for NativeTransform {
    fn eq(&self, other: &Self) -> bool {
        // Closures are not comparable; the registered name identifies them
        self.name == other.name
    }
}

/// A unary value transformation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Pass the value through unchanged
    #[default]
    Identity,
    /// `list -> [item[property]]`
    Pluck { property: String },
    /// Ignore the input and produce a fixed value
    Constant { value: Value },
    /// Read a path from the input; a miss yields `null`
    Get { path: Path },
    /// Build an object whose fields are read from paths of the input
    FieldMap { fields: BTreeMap<String, Path> },
    /// Apply the inner transform to every element of an array
    Each { transform: Box<Transform> },
    /// Apply each step to the previous step's output
    Compose { steps: Vec<Transform> },
    /// A function looked up in the registry during resolution
    Named { name: String },
    /// Host closure
    #[serde(skip)]
    Native(NativeTransform),
}

impl Transform {
    pub fn is_identity(&self) -> bool {
        matches!(self, Transform::Identity)
    }

    /// Apply the transform to `value`.
    ///
    /// Errors raised here are faults in the transform itself and are returned
    /// to the caller unchanged.
    pub fn apply(&self, value: &Value) -> Result<Value> {
        match self {
            Transform::Identity => Ok(value.clone()),
            Transform::Pluck { property } => {
                let items = expect_array(self, value)?;
                let segment = Segment::from_token(property);
                Ok(Value::Array(
                    items
                        .iter()
                        .map(|item| {
                            crate::path::read(item, std::slice::from_ref(&segment))
                                .cloned()
                                .unwrap_or(Value::Null)
                        })
                        .collect(),
                ))
            }
            Transform::Constant { value: constant } => Ok(constant.clone()),
            Transform::Get { path } => Ok(path.read(value).cloned().unwrap_or(Value::Null)),
            Transform::FieldMap { fields } => {
                let mut map = Map::new();
                for (field, path) in fields {
                    map.insert(field.clone(), path.read(value).cloned().unwrap_or(Value::Null));
                }
                Ok(Value::Object(map))
            }
            Transform::Each { transform } => {
                let items = expect_array(self, value)?;
                items
                    .iter()
                    .map(|item| transform.apply(item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
            Transform::Compose { steps } => steps
                .iter()
                .try_fold(value.clone(), |current, step| step.apply(&current)),
            Transform::Named { name } => Err(Error::runtime(
                self.to_string(),
                format!("transform '{}' was never resolved against a registry", name),
            )),
            Transform::Native(native) => native.call(value),
        }
    }
}

fn expect_array<'a>(transform: &Transform, value: &'a Value) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        Error::runtime(
            transform.to_string(),
            format!("expected an array, found {}", kind_of(value)),
        )
    })
}

/// Short JSON type name used in error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => write!(f, "identity"),
            Transform::Pluck { property } => write!(f, "pluck({})", property),
            Transform::Constant { value } => write!(f, "constant({})", value),
            Transform::Get { path } => write!(f, "get({})", path),
            Transform::FieldMap { fields } => {
                let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                write!(f, "field_map({})", names.join(", "))
            }
            Transform::Each { transform } => write!(f, "each({})", transform),
            Transform::Compose { steps } => {
                let parts: Vec<String> = steps.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(" | "))
            }
            Transform::Named { name } => write!(f, "{}", name),
            Transform::Native(native) => write!(f, "{}", native.name()),
        }
    }
}

/// Parameter names of a `(params, body)` transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// A single name, or several separated by commas
    One(String),
    Many(Vec<String>),
}

impl Params {
    pub fn names(&self) -> Vec<String> {
        match self {
            Params::One(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            Params::Many(names) => names.iter().map(|name| name.trim().to_string()).collect(),
        }
    }
}

impl From<&str> for Params {
    fn from(raw: &str) -> Self {
        Params::One(raw.to_string())
    }
}

/// A transform as supplied by the caller, before resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformSource {
    /// Body only; the piped value is bound to `value`
    Body(String),
    /// `[params, body]`
    Pair(Params, String),
    /// `{ "args": params, "body": body }`
    Function { args: Params, body: String },
    /// An already-built transform, including host closures
    Compiled(Transform),
    /// Anything else; resolves according to the resolution mode
    Invalid(Value),
}

impl TransformSource {
    pub fn body(body: impl Into<String>) -> Self {
        TransformSource::Body(body.into())
    }

    pub fn pair(params: impl Into<Params>, body: impl Into<String>) -> Self {
        TransformSource::Pair(params.into(), body.into())
    }

    /// Wrap a host closure
    pub fn native<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        TransformSource::Compiled(Transform::Native(NativeTransform::new(name, func)))
    }
}

impl From<Transform> for TransformSource {
    fn from(transform: Transform) -> Self {
        TransformSource::Compiled(transform)
    }
}

impl From<&str> for TransformSource {
    fn from(body: &str) -> Self {
        TransformSource::Body(body.to_string())
    }
}
