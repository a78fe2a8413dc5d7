//! Spec data types
//!
//! A [`Spec`] is one read/transform/write rule. Its JSON form accepts both
//! the long field names and the short `src` / `dst` / `pipe` aliases:
//!
//! ```
//! use racor_core::Spec;
//! use serde_json::json;
//!
//! let spec: Spec = serde_json::from_value(json!({
//!     "src": "posts",
//!     "dst": "schema.properties.post.enum",
//!     "pipe": ["posts", "posts[*].id"]
//! })).unwrap();
//! assert_eq!(spec.destination.to_string(), "schema.properties.post.enum");
//! ```

use crate::error::Result;
use crate::path::Path;
use crate::transform::TransformSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single source-path / transform / destination-path rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Where to read from the input
    #[serde(alias = "src")]
    pub source: Path,

    /// Where to write in the output
    #[serde(alias = "dst")]
    pub destination: Path,

    /// Applied to the read value (or the fallback) before writing
    #[serde(default, alias = "pipe", skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformSource>,

    /// Substituted when `source` does not resolve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Value>,
}

impl Spec {
    pub fn new(source: impl Into<Path>, destination: impl Into<Path>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            transform: None,
            fallback: None,
        }
    }

    pub fn with_transform(mut self, transform: impl Into<TransformSource>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn with_fallback(mut self, fallback: Value) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

/// Either one spec or an ordered list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecSet {
    One(Spec),
    Many(Vec<Spec>),
}

impl SpecSet {
    /// Decode a spec or spec list from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a spec or spec list from an in-memory JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn as_slice(&self) -> &[Spec] {
        match self {
            SpecSet::One(spec) => std::slice::from_ref(spec),
            SpecSet::Many(specs) => specs,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl AsRef<[Spec]> for Spec {
    fn as_ref(&self) -> &[Spec] {
        std::slice::from_ref(self)
    }
}

impl AsRef<[Spec]> for SpecSet {
    fn as_ref(&self) -> &[Spec] {
        self.as_slice()
    }
}

impl From<Spec> for SpecSet {
    fn from(spec: Spec) -> Self {
        SpecSet::One(spec)
    }
}

impl From<Vec<Spec>> for SpecSet {
    fn from(specs: Vec<Spec>) -> Self {
        SpecSet::Many(specs)
    }
}
