//! Racor Core - declarative get/transform/set reshaping of JSON trees
//!
//! Given a [`Spec`] naming a source path, an optional transform and a
//! destination path, Racor reads the value from an input tree, pipes it
//! through the transform and deep-merges the result into a new output tree.
//! Neither the input nor a caller-supplied output is ever modified.
//!
//! # Main Components
//!
//! - **Paths**: dotted/bracketed path parsing and presence-checked reads
//! - **Trees**: singleton construction and non-mutating deep merge
//! - **Transforms**: a closed set of transforms, body compilation and a
//!   registry of named host functions
//! - **Engine**: single-spec execution and batch application
//! - **Shortcuts**: `{ source: destination }` path maps
//!
//! # Example
//!
//! ```
//! use racor_core::{apply, pluck_transform, Spec};
//! use serde_json::json;
//!
//! let input = json!({"posts": [{"id": 1414}, {"id": 11}]});
//! let spec = Spec::new("posts", "schema.properties.post.enum")
//!     .with_transform(pluck_transform("id"));
//!
//! let output = apply(&spec, &input, None).unwrap();
//! assert_eq!(output["schema"]["properties"]["post"]["enum"], json!([1414, 11]));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod shortcuts;
pub mod spec;
pub mod transform;
pub mod tree;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use engine::{empty_tree, Racor};
pub use error::{Error, ResolutionMode, Result};
pub use path::{Path, Segment};
pub use shortcuts::{from_path_map, from_path_map_value};
pub use spec::{Spec, SpecSet};
pub use transform::{
    compose, pluck_transform, NativeTransform, Params, Transform, TransformRegistry,
    TransformResolver, TransformSource,
};
pub use tree::{build_singleton, merge, write};

use serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Apply a spec or list of specs with the default engine
pub fn apply<S>(specs: &S, input: &Value, output: Option<&Value>) -> Result<Value>
where
    S: AsRef<[Spec]> + ?Sized,
{
    Racor::new().run(specs, input, output)
}

/// Apply specs left to right over `output` with the default engine
pub fn apply_all(specs: &[Spec], input: &Value, output: &Value) -> Result<Value> {
    Racor::new().apply_all(specs, input, output)
}

/// Apply a path map with one shared transform, using the default engine
pub fn apply_with_shared_transform<I, K, V>(
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
    Racor::new().apply_with_shared_transform(transform, map, input, output)
}

/// Apply a path map without transforms, using the default engine
pub fn apply_path_map<I, K, V>(map: I, input: &Value, output: Option<&Value>) -> Result<Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Racor::new().apply_path_map(map, input, output)
}

/// Apply a path map plucking `property` from each source list, using the
/// default engine
pub fn apply_pluck<I, K, V>(
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
    Racor::new().apply_pluck(property, map, input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_apply_accepts_spec_list_and_set() {
        let input = json!({"a": 1, "b": 2});
        let specs = vec![Spec::new("a", "x"), Spec::new("b", "y")];
        let from_vec = apply(&specs, &input, None).unwrap();
        let from_set = apply(&SpecSet::from(specs), &input, None).unwrap();
        assert_eq!(from_vec, json!({"x": 1, "y": 2}));
        assert_eq!(from_vec, from_set);
    }

    #[test]
    fn test_apply_all_over_seed() {
        let seed = json!({"kept": 1});
        let out = apply_all(&[Spec::new("a", "x")], &json!({"a": 2}), &seed).unwrap();
        assert_eq!(out, json!({"kept": 1, "x": 2}));
        assert_eq!(seed, json!({"kept": 1}));
    }
}
