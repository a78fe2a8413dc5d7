//! Path parsing and presence-checked reads
//!
//! A path such as `a.b[0].c` is split on `.`, `[` and `]` into an ordered
//! list of [`Segment`]s, dropping empty tokens, so `a..b`, `[0]a` and
//! `a.b[0]` are all accepted. Parsing never fails.
//!
//! Reads walk the tree one segment at a time and check for presence at every
//! step: a member holding `0`, `false`, `""` or `null` is found, not missing.
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

pub mod segment;

pub use segment::{Segment, MAX_INDEX};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const DELIMITERS: [char; 3] = ['.', '[', ']'];

/// An immutable, reusable sequence of segments addressing a location in a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a dotted/bracketed path string
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split(&DELIMITERS[..])
            .filter(|token| !token.is_empty())
            .map(Segment::from_token)
            .collect();
        Self { segments }
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The root path, addressing the whole tree
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Borrow the value at this path, if every step is present
    pub fn read<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        read(tree, &self.segments)
    }

    /// Owned read with a fallback for misses
    pub fn read_or(&self, tree: &Value, fallback: Option<&Value>) -> Option<Value> {
        read_or(tree, &self.segments, fallback)
    }

    pub fn exists(&self, tree: &Value) -> bool {
        self.read(tree).is_some()
    }
}

/// Walk `tree` along `segments`, returning `None` as soon as a step is missing
/// or the current node cannot be indexed.
pub fn read<'a>(tree: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments.iter().try_fold(tree, |node, segment| step(node, segment))
}

/// Like [`read`], but owned and substituting `fallback` on a miss.
///
/// With no fallback a miss stays `None`, which callers can tell apart from a
/// present `null`.
pub fn read_or(tree: &Value, segments: &[Segment], fallback: Option<&Value>) -> Option<Value> {
    match read(tree, segments) {
        Some(value) => Some(value.clone()),
        None => {
            log::trace!("path {} not found, using fallback", Path::from_segments(segments.to_vec()));
            fallback.cloned()
        }
    }
}

/// Parse `path` and read it from `tree`.
pub fn get(tree: &Value, path: &str, fallback: Option<&Value>) -> Option<Value> {
    Path::parse(path).read_or(tree, fallback)
}

fn step<'a>(node: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (node, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Object(map), Segment::Index(index)) => map.get(&index.to_string()),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        _ => None,
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if position > 0 => write!(f, ".{}", key)?,
                _ => write!(f, "{}", segment)?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Path::parse(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Path::parse(&path)
    }
}

impl From<&String> for Path {
    fn from(path: &String) -> Self {
        Path::parse(path)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Path::parse(&raw))
    }
}
