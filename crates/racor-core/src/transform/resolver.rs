//! Normalization of caller-supplied transforms into [`Transform`] values
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

use super::parser::parse_body;
use super::registry::TransformRegistry;
use super::types::{Transform, TransformSource};
use crate::error::{Error, ResolutionMode, Result};

/// Turns a [`TransformSource`] into a ready-to-apply [`Transform`]
#[derive(Debug, Clone, Copy)]
pub struct TransformResolver<'r> {
    registry: &'r TransformRegistry,
    mode: ResolutionMode,
}

impl<'r> TransformResolver<'r> {
    pub fn new(registry: &'r TransformRegistry, mode: ResolutionMode) -> Self {
        Self { registry, mode }
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    /// Resolve `source` into a transform.
    ///
    /// Absence resolves to identity. A source that cannot be constructed
    /// resolves to identity too, unless the mode is [`ResolutionMode::Strict`].
    pub fn resolve(&self, source: Option<&TransformSource>) -> Result<Transform> {
        let Some(source) = source else {
            return Ok(Transform::Identity);
        };
        match self.construct(source) {
            Ok(transform) => Ok(transform),
            Err(err) => self.recover(err),
        }
    }

    fn construct(&self, source: &TransformSource) -> Result<Transform> {
        let transform = match source {
            TransformSource::Body(body) => parse_body(body, Vec::new())?,
            TransformSource::Pair(params, body) | TransformSource::Function { args: params, body } => {
                parse_body(body, params.names())?
            }
            TransformSource::Compiled(transform) => transform.clone(),
            TransformSource::Invalid(value) => {
                return Err(Error::TransformConstruction {
                    message: "expected a body string, an [args, body] pair, an {args, body} object or a transform".to_string(),
                    body: value.to_string(),
                });
            }
        };
        self.link(transform)
    }

    /// Replace every `Named` transform with the registered function
    pub fn link(&self, transform: Transform) -> Result<Transform> {
        Ok(match transform {
            Transform::Named { name } => match self.registry.get(&name) {
                Some(native) => Transform::Native(native.clone()),
                None => {
                    return Err(Error::TransformConstruction {
                        message: format!("unknown transform '{}'", name),
                        body: name,
                    })
                }
            },
            Transform::Each { transform } => Transform::Each {
                transform: Box::new(self.link(*transform)?),
            },
            Transform::Compose { steps } => Transform::Compose {
                steps: steps
                    .into_iter()
                    .map(|step| self.link(step))
                    .collect::<Result<Vec<_>>>()?,
            },
            other => other,
        })
    }

    fn recover(&self, err: Error) -> Result<Transform> {
        match self.mode {
            ResolutionMode::Strict => Err(err),
            ResolutionMode::Warn => {
                log::warn!("{}; falling back to identity", err);
                Ok(Transform::Identity)
            }
            ResolutionMode::Lenient => {
                log::debug!("{}; falling back to identity", err);
                Ok(Transform::Identity)
            }
        }
    }
}
