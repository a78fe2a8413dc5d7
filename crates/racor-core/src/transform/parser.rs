//! Transform body parser
//!
//! Bodies are written in a small closed expression language and compiled to
//! [`Transform`] values. No host code is ever evaluated.
//!
//! ```text
//! body      := stage ( '|' stage )*
//! stage     := literal | reference | name
//! literal   := any JSON literal: "fixed", 42, [1, 2], {"a": 1}, true, false, null
//! reference := root ( '.' key | '[' digits ']' | '[' quoted ']' | '[*]' )*
//! root      := a declared parameter, or `$`
//! name      := a registered or built-in transform
//! ```
//!
//! Each stage receives the previous stage's output, bound to the same
//! parameter names. `[*]` applies the rest of the reference to every element
//! of an array, so `posts[*].id` plucks `id` from each post.
//!
//! Copyright (c) 2025 Racor Team
//! Licensed under the Apache-2.0 license

use super::types::Transform;
use crate::error::{Error, Result};
use crate::path::{Path, Segment};
use serde_json::Value;

/// Name bound to the piped value when a body has no declared parameters
pub const IMPLICIT_PARAM: &str = "value";

/// Root that always refers to the piped value
pub const ROOT: &str = "$";

const KEYWORDS: [(&str, Value); 3] = [
    ("true", Value::Bool(true)),
    ("false", Value::Bool(false)),
    ("null", Value::Null),
];

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Segment(Segment),
    Each,
}

/// Recursive descent parser over a transform body
pub struct BodyParser<'a> {
    input: &'a str,
    position: usize,
    params: Vec<String>,
}

impl<'a> BodyParser<'a> {
    /// Create a parser with the given parameter names bound.
    ///
    /// The first parameter receives the piped value; any further parameters
    /// evaluate to `null`. An empty list binds [`IMPLICIT_PARAM`].
    pub fn new(input: &'a str, params: Vec<String>) -> Self {
        let params = if params.is_empty() {
            vec![IMPLICIT_PARAM.to_string()]
        } else {
            params
        };
        Self {
            input,
            position: 0,
            params,
        }
    }

    /// Parse the whole body into a transform
    pub fn parse(mut self) -> Result<Transform> {
        let mut stages = Vec::new();
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                return Err(self.error(if stages.is_empty() {
                    "empty transform body"
                } else {
                    "expected a stage after '|'"
                }));
            }
            stages.push(self.parse_stage()?);
            self.skip_whitespace();
            match self.current_char() {
                None => break,
                Some('|') => self.advance(),
                Some(ch) => {
                    return Err(self.error(&format!("unexpected character '{}'", ch)));
                }
            }
        }

        let mut stages: Vec<Transform> = stages.into_iter().filter(|t| !t.is_identity()).collect();
        Ok(match stages.len() {
            0 => Transform::Identity,
            1 => stages.remove(0),
            _ => Transform::Compose { steps: stages },
        })
    }

    fn parse_stage(&mut self) -> Result<Transform> {
        match self.current_char() {
            Some(ch) if ch == '"' || ch == '{' || ch == '[' || ch == '-' || ch.is_ascii_digit() => {
                self.parse_literal()
            }
            Some(ch) if is_ident_start(ch) => self.parse_reference_or_name(),
            Some(ch) => Err(self.error(&format!("unexpected character '{}'", ch))),
            None => Err(self.error("unexpected end of body")),
        }
    }

    fn parse_literal(&mut self) -> Result<Transform> {
        let input: &'a str = self.input;
        let rest = &input[self.position..];

        // Numbers end at the first non-number character, so `42|name` works
        if rest.starts_with(|ch: char| ch == '-' || ch.is_ascii_digit()) {
            let len = rest.find(|ch: char| !is_number_char(ch)).unwrap_or(rest.len());
            return match serde_json::from_str::<Value>(&rest[..len]) {
                Ok(value) => {
                    self.position += len;
                    Ok(Transform::Constant { value })
                }
                Err(e) => Err(self.error(&format!("invalid literal: {}", e))),
            };
        }

        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => {
                self.position += stream.byte_offset();
                Ok(Transform::Constant { value })
            }
            Some(Err(e)) => Err(self.error(&format!("invalid literal: {}", e))),
            None => Err(self.error("expected a literal")),
        }
    }

    fn parse_reference_or_name(&mut self) -> Result<Transform> {
        let ident = self.parse_identifier();
        let steps = self.parse_steps()?;

        if let Some((_, value)) = KEYWORDS.iter().find(|(word, _)| *word == ident) {
            if steps.is_empty() {
                return Ok(Transform::Constant { value: value.clone() });
            }
        }

        if ident == ROOT || self.params.first() == Some(&ident) {
            return Ok(compile_steps(&steps));
        }

        if self.params.contains(&ident) {
            // Extra parameters are never bound to anything
            return Ok(Transform::Constant { value: Value::Null });
        }

        if steps.is_empty() {
            return Ok(Transform::Named { name: ident });
        }

        Err(self.error(&format!("unknown identifier '{}'", ident)))
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if is_ident_continue(ch) {
                self.advance();
            } else {
                break;
            }
        }
        self.input[start..self.position].to_string()
    }

    fn parse_steps(&mut self) -> Result<Vec<Step>> {
        let mut steps = Vec::new();
        loop {
            match self.current_char() {
                Some('.') => {
                    self.advance();
                    let key = self.parse_key();
                    if key.is_empty() {
                        return Err(self.error("expected a key after '.'"));
                    }
                    steps.push(Step::Segment(Segment::from_token(&key)));
                }
                Some('[') => {
                    self.advance();
                    self.skip_whitespace();
                    let step = match self.current_char() {
                        Some('*') => {
                            self.advance();
                            Step::Each
                        }
                        Some(quote @ ('"' | '\'')) => {
                            self.advance();
                            Step::Segment(Segment::Key(self.parse_quoted(quote)?))
                        }
                        _ => {
                            let token = self.parse_key();
                            if token.is_empty() {
                                return Err(self.error("expected an index, a quoted key or '*'"));
                            }
                            Step::Segment(Segment::from_token(&token))
                        }
                    };
                    self.skip_whitespace();
                    self.expect_char(']')?;
                    steps.push(step);
                }
                _ => return Ok(steps),
            }
        }
    }

    fn parse_key(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch == '.' || ch == '[' || ch == ']' || ch == '|' || ch.is_whitespace() {
                break;
            }
            self.advance();
        }
        self.input[start..self.position].to_string()
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch == quote {
                let key = self.input[start..self.position].to_string();
                self.advance();
                return Ok(key);
            }
            self.advance();
        }
        Err(self.error("unterminated quoted key"))
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        if self.current_char() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", expected)))
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn error(&self, message: &str) -> Error {
        Error::TransformConstruction {
            message: format!("{} at position {}", message, self.position),
            body: self.input.to_string(),
        }
    }
}

/// Parse `body` with `params` bound
pub fn parse_body(body: &str, params: Vec<String>) -> Result<Transform> {
    BodyParser::new(body, params).parse()
}

fn compile_steps(steps: &[Step]) -> Transform {
    let split = steps.iter().position(|step| *step == Step::Each);
    let (prefix, rest) = match split {
        Some(at) => (&steps[..at], Some(&steps[at + 1..])),
        None => (steps, None),
    };

    let segments: Vec<Segment> = prefix
        .iter()
        .filter_map(|step| match step {
            Step::Segment(segment) => Some(segment.clone()),
            Step::Each => None,
        })
        .collect();

    let head = if segments.is_empty() {
        Transform::Identity
    } else {
        Transform::Get { path: Path::from_segments(segments) }
    };

    let Some(rest) = rest else {
        return head;
    };

    let each = Transform::Each {
        transform: Box::new(compile_steps(rest)),
    };
    if head.is_identity() {
        each
    } else {
        Transform::Compose { steps: vec![head, each] }
    }
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E')
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}
