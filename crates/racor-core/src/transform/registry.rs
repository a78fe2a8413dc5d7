//! Registry of named host transforms
//!
//! Bodies and serialized specs refer to host functions by name; the registry
//! is where those names are bound to closures.

use super::built_in::{builtin, BUILTIN_NAMES};
use super::types::NativeTransform;
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    functions: HashMap<String, NativeTransform>,
}

impl TransformRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in transforms
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for name in BUILTIN_NAMES {
            if let Some(native) = builtin(name) {
                registry.functions.insert(name.to_string(), native);
            }
        }
        registry
    }

    /// Bind `name` to `func`, replacing any previous binding
    pub fn register<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.functions.contains_key(&name) {
            log::debug!("replacing registered transform '{}'", name);
        }
        self.functions
            .insert(name.clone(), NativeTransform::new(name, func));
        self
    }

    pub fn get(&self, name: &str) -> Option<&NativeTransform> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
