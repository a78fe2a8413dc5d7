//! Compact `{ source: destination }` forms
//!
//! A path map lists source paths and the destination each one is written
//! to. Every entry becomes a [`Spec`], evaluated in iteration order, all
//! sharing the same optional transform.

use crate::engine::Racor;
use crate::error::{Error, Result};
use crate::spec::Spec;
use crate::transform::{pluck_transform, TransformSource};
use serde::de::Error as _;
use serde_json::Value;

/// Expand a path map into specs sharing `transform`
pub fn from_path_map<I, K, V>(map: I, transform: Option<TransformSource>) -> Vec<Spec>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    map.into_iter()
        .map(|(source, destination)| Spec {
            source: source.as_ref().into(),
            destination: destination.as_ref().into(),
            transform: transform.clone(),
            fallback: None,
        })
        .collect()
}

/// Expand a JSON object of `source: destination` strings
pub fn from_path_map_value(map: &Value, transform: Option<TransformSource>) -> Result<Vec<Spec>> {
    let object = map.as_object().ok_or_else(|| {
        Error::from(serde_json::Error::custom("a path map must be a JSON object"))
    })?;

    let mut entries = Vec::with_capacity(object.len());
    for (source, destination) in object {
        let destination = destination.as_str().ok_or_else(|| {
            Error::from(serde_json::Error::custom(format!(
                "destination for '{}' must be a string path",
                source
            )))
        })?;
        entries.push((source.as_str(), destination));
    }
    Ok(from_path_map(entries, transform))
}

impl Racor {
    /// Apply a path map with one shared transform
    pub fn apply_with_shared_transform<I, K, V>(
        &self,
        transform: impl Into<TransformSource>,
        map: I,
        input: &Value,
        output: Option<&Value>,
    ) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let specs = from_path_map(map, Some(transform.into()));
        self.run(&specs, input, output)
    }

    /// Apply a path map, copying every value unchanged
    pub fn apply_path_map<I, K, V>(&self, map: I, input: &Value, output: Option<&Value>) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let specs = from_path_map(map, None);
        self.run(&specs, input, output)
    }

    /// Apply a path map, plucking `property` from each source list
    pub fn apply_pluck<I, K, V>(
        &self,
        property: &str,
        map: I,
        input: &Value,
        output: Option<&Value>,
    ) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.apply_with_shared_transform(pluck_transform(property), map, input, output)
    }
}
