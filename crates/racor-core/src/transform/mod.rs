//! Transform system: what happens to a value between read and write
//!
//! # Module Organization
//!
//! - [`types`] - `Transform`, `TransformSource` and host closures
//! - [`parser`] - compiler for transform bodies
//! - [`registry`] - named host functions
//! - [`resolver`] - normalizes a `TransformSource` into a `Transform`
//! - [`built_in`] - constructors and built-in named functions
//!
//! # Examples
//!
//! ```
//! use racor_core::transform::{TransformRegistry, TransformResolver, TransformSource};
//! use racor_core::ResolutionMode;
//! use serde_json::json;
//!
//! let registry = TransformRegistry::with_builtins();
//! let resolver = TransformResolver::new(&registry, ResolutionMode::Warn);
//!
//! let source = TransformSource::pair("posts", "posts[*].id");
//! let ids = resolver.resolve(Some(&source)).unwrap();
//! assert_eq!(ids.apply(&json!([{"id": 1414}, {"id": 11}])).unwrap(), json!([1414, 11]));
//! ```
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod types;


pub use built_in::{compose, pluck_transform};
pub use registry::TransformRegistry;
pub use resolver::TransformResolver;
pub use types::{NativeTransform, Params, Transform, TransformFn, TransformSource};
