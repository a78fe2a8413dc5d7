//! Spec execution and batch application
//!
//! [`Racor`] owns the configuration and the transform registry. It reads
//! the source path, pipes the value (or the fallback) through the resolved
//! transform and deep-merges the result into a copy of the output.
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

use crate::config::EngineConfig;
use crate::error::Result;
use crate::spec::Spec;
use crate::transform::{TransformRegistry, TransformResolver};
use crate::tree;
use serde_json::{Map, Value};

/// The get/transform/set engine
#[derive(Debug, Clone)]
pub struct Racor {
    config: EngineConfig,
    registry: TransformRegistry,
}

impl Default for Racor {
    fn default() -> Self {
        Self::new()
    }
}

impl Racor {
    /// Engine with default configuration and the built-in transforms
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            registry: TransformRegistry::with_builtins(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_registry(mut self, registry: TransformRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register a named host transform usable from bodies and serialized specs
    pub fn register<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.registry.register(name, func);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> TransformResolver<'_> {
        TransformResolver::new(&self.registry, self.config.resolution)
    }

    /// Apply one spec, returning a new tree.
    ///
    /// `input` and `output` are left untouched. A fallback still flows
    /// through the transform. Errors raised by the transform itself are
    /// returned as-is.
    pub fn apply(&self, spec: &Spec, input: &Value, output: &Value) -> Result<Value> {
        let origin = match spec.source.read_or(input, spec.fallback.as_ref()) {
            Some(origin) => origin,
            None if self.config.absent_as_null => Value::Null,
            None => {
                log::debug!("source {} not found and no fallback, skipping", spec.source);
                return Ok(output.clone());
            }
        };

        let transform = self.resolver().resolve(spec.transform.as_ref())?;
        let value = transform.apply(&origin)?;
        log::trace!("{} -> {} via {}", spec.source, spec.destination, transform);

        Ok(tree::write(output, &spec.destination, &value))
    }

    /// Apply specs left to right, threading the accumulated output.
    ///
    /// Later specs merge over earlier ones. The first failing transform stops
    /// the batch.
    pub fn apply_all(&self, specs: &[Spec], input: &Value, output: &Value) -> Result<Value> {
        let span = tracing::debug_span!("apply_all", specs = specs.len());
        let _guard = span.enter();

        specs
            .iter()
            .enumerate()
            .try_fold(output.clone(), |accumulated, (position, spec)| {
                log::trace!("applying spec {} of {}", position + 1, specs.len());
                self.apply(spec, input, &accumulated)
            })
    }

    /// Apply a spec or list of specs, seeding with an empty object when no
    /// output is given
    pub fn run<S>(&self, specs: &S, input: &Value, output: Option<&Value>) -> Result<Value>
    where
        S: AsRef<[Spec]> + ?Sized,
    {
        match output {
            Some(output) => self.apply_all(specs.as_ref(), input, output),
            None => self.apply_all(specs.as_ref(), input, &empty_tree()),
        }
    }
}

/// The default output seed
pub fn empty_tree() -> Value {
    Value::Object(Map::new())
}
