//! Error types for the Racor core library
//!
//! Path misses and merge conflicts are resolved locally and never surface
//! here. What remains is transform construction (only in strict mode),
//! transform evaluation, and the loading of specs and configuration.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for Racor operations
#[derive(Error, Debug)]
pub enum Error {
    /// A transform body could not be compiled
    #[error("Transform construction failed: {message} (body: {body:?})")]
    TransformConstruction {
        message: String,
        body: String,
    },

    /// A transform failed while being applied to a value
    #[error("Transform failed: {transform} - {message}")]
    TransformRuntime {
        transform: String,
        message: String,
    },

    /// A spec document could not be decoded
    #[error("Invalid spec: {message}")]
    SpecFormat {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a runtime failure inside a named transform
    pub fn runtime(transform: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TransformRuntime {
            transform: transform.into(),
            message: message.into(),
        }
    }
}

/// How the resolver reacts to a transform that cannot be constructed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Fail with `Error::TransformConstruction`
    Strict,
    /// Substitute identity and log a warning
    #[default]
    Warn,
    /// Substitute identity silently
    Lenient,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Strict => write!(f, "strict"),
            ResolutionMode::Warn => write!(f, "warn"),
            ResolutionMode::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for ResolutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ResolutionMode::Strict),
            "warn" => Ok(ResolutionMode::Warn),
            "lenient" => Ok(ResolutionMode::Lenient),
            other => Err(Error::Configuration {
                message: format!(
                    "unknown resolution mode '{}', expected strict, warn or lenient",
                    other
                ),
                source: None,
            }),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SpecFormat {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}
