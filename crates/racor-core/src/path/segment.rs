//! Path segments
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

use std::fmt;

/// Largest token treated as an array index. Larger numbers address object
/// members, so writes never allocate more than this many holes.
pub const MAX_INDEX: usize = 65_535;

/// A single step of a path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member name
    Key(String),
    /// Array position; also matches an object member named by its digits
    Index(usize),
}

impl Segment {
    /// Classify a raw token.
    ///
    /// Only canonical decimal tokens (`0`, or digits without a leading zero)
    /// no greater than [`MAX_INDEX`] are indices. Anything else, `007`
    /// included, is an object key.
    pub fn from_token(token: &str) -> Self {
        let canonical = match token.as_bytes() {
            [] => false,
            [b'0'] => true,
            [b'0', ..] => false,
            bytes => bytes.iter().all(u8::is_ascii_digit),
        };
        if canonical {
            if let Ok(index) = token.parse::<usize>() {
                if index <= MAX_INDEX {
                    return Segment::Index(index);
                }
            }
        }
        Segment::Key(token.to_string())
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Array position addressed by this segment, if it is a writable index
    pub fn array_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) if *index <= MAX_INDEX => Some(*index),
            _ => None,
        }
    }

    /// Key used when this segment addresses an object member
    pub fn as_key(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(token: &str) -> Self {
        Segment::from_token(token)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_tokens_become_indices() {
        assert_eq!(Segment::from_token("0"), Segment::Index(0));
        assert_eq!(Segment::from_token("42"), Segment::Index(42));
    }

    #[test]
    fn test_mixed_tokens_stay_keys() {
        assert_eq!(Segment::from_token("0abc"), Segment::Key("0abc".to_string()));
        assert_eq!(Segment::from_token("-1"), Segment::Key("-1".to_string()));
        assert_eq!(Segment::from_token("id"), Segment::Key("id".to_string()));
    }

    #[test]
    fn test_leading_zero_tokens_stay_keys() {
        assert_eq!(Segment::from_token("007"), Segment::Key("007".to_string()));
        assert_eq!(Segment::from_token("00"), Segment::Key("00".to_string()));
        assert_eq!(Segment::from_token("10"), Segment::Index(10));
    }

    #[test]
    fn test_index_cap() {
        assert_eq!(Segment::from_token("65535"), Segment::Index(MAX_INDEX));
        assert_eq!(Segment::from_token("65536"), Segment::Key("65536".to_string()));
        assert_eq!(Segment::Index(usize::MAX).array_index(), None);
        assert_eq!(Segment::Index(3).array_index(), Some(3));
    }

    #[test]
    fn test_overflowing_index_is_key() {
        let huge = "99999999999999999999999999";
        assert_eq!(Segment::from_token(huge), Segment::Key(huge.to_string()));
    }

    #[test]
    fn test_as_key() {
        assert_eq!(Segment::Index(3).as_key(), "3");
        assert_eq!(Segment::Key("a".into()).as_key(), "a");
    }
}
