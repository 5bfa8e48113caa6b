//! Structured field paths into a JSON data tree
//!
//! A [`FieldPath`] is a sequence of object keys and array indices. Paths are
//! parsed from the dot/bracket notation used by form and schema tooling
//! (`address.lines[0]`, `meta["content-type"]`, `$.a.b`) and compared by
//! segment prefix, so `a.b` is an ancestor of `a.b.c` while `ab` is not an
//! ancestor of `abc`.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};
use thiserror::Error;

/// Errors produced while parsing a path expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A `.` or `[]` with nothing between the delimiters
    #[error("Empty path segment at position {position} in '{input}'")]
    EmptySegment { position: usize, input: String },

    /// A `[` without its closing `]` (or an unclosed quote inside brackets)
    #[error("Unterminated bracket starting at position {position} in '{input}'")]
    UnterminatedBracket { position: usize, input: String },

    /// A character that cannot appear at this point of the expression
    #[error("Unexpected character '{found}' at position {position} in '{input}'")]
    UnexpectedChar {
        found: char,
        position: usize,
        input: String,
    },
}

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property
    Key(String),
    /// Array element
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a value inside a data tree
///
/// The root path has no segments and displays as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The path of the document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot/bracket path expression
    ///
    /// # Examples
    ///
    /// ```rust
    /// use formcheck_validation::{FieldPath, PathSegment};
    ///
    /// let path = FieldPath::parse("items[2].name").unwrap();
    /// assert_eq!(
    ///     path.segments(),
    ///     &[
    ///         PathSegment::Key("items".into()),
    ///         PathSegment::Index(2),
    ///         PathSegment::Key("name".into()),
    ///     ]
    /// );
    /// assert_eq!(path.to_string(), "items[2].name");
    /// ```
    pub fn parse(input: &str) -> Result<Self, PathError> {
        Parser::new(input).parse()
    }

    /// Parse `input`, falling back to a single literal key when it is not a
    /// well-formed expression
    pub fn parse_or_key(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|_| Self::root().child(input))
    }

    /// Path to a named property below this one
    pub fn child(&self, key: impl Into<String>) -> Self {
        self.clone().join(PathSegment::Key(key.into()))
    }

    /// Path to an array element below this one
    pub fn child_index(&self, index: usize) -> Self {
        self.clone().join(PathSegment::Index(index))
    }

    /// Append a segment, consuming the path
    pub fn join(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, `None` for the root
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Path one level up, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// True when `prefix` is this path or one of its ancestors
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// True when either path is an ancestor of (or equal to) the other
    pub fn is_related_to(&self, other: &FieldPath) -> bool {
        self.starts_with(other) || other.starts_with(self)
    }

    /// Resolve this path against a JSON value
    ///
    /// Keys that look like integers address array elements and indices
    /// address object properties named by the number, matching how form
    /// data is usually accessed. Returns `None` when any step is missing.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key),
                (PathSegment::Key(key), Value::Array(items)) => {
                    key.parse::<usize>().ok().and_then(|index| items.get(index))
                }
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
                (PathSegment::Index(index), Value::Object(map)) => map.get(&index.to_string()),
                _ => None,
            })
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Key(key) if is_plain_key(key, i == 0) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => {
                    f.write_str("[\"")?;
                    for ch in key.chars() {
                        if ch == '"' || ch == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", ch)?;
                    }
                    f.write_str("\"]")?;
                }
            }
        }
        Ok(())
    }
}

/// Keys that survive a round trip through dot notation
fn is_plain_key(key: &str, first: bool) -> bool {
    !key.is_empty()
        && !key.contains(|c| matches!(c, '.' | '[' | ']' | '"' | '\'' | '\\'))
        && !(first && key == "$")
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FieldPath::parse(&raw).map_err(de::Error::custom)
    }
}

/// Recursive descent parser for dot/bracket path expressions
struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<FieldPath, PathError> {
        let rooted = self.skip_root_marker();
        let mut segments = Vec::new();

        while let Some(&(position, ch)) = self.chars.peek() {
            match ch {
                '.' => {
                    self.chars.next();
                    segments.push(self.parse_identifier(position + 1)?);
                }
                '[' => {
                    self.chars.next();
                    segments.push(self.parse_bracket(position)?);
                }
                _ if segments.is_empty() && !rooted => {
                    segments.push(self.parse_identifier(position)?);
                }
                found => return Err(self.unexpected(found, position)),
            }
        }

        Ok(FieldPath { segments })
    }

    /// Consume a leading `$` when it stands for the document root
    fn skip_root_marker(&mut self) -> bool {
        let mut lookahead = self.input.chars();
        if lookahead.next() != Some('$') {
            return false;
        }
        match lookahead.next() {
            None | Some('.') | Some('[') => {
                self.chars.next();
                true
            }
            Some(_) => false,
        }
    }

    /// Parse an unquoted property name up to the next `.` or `[`
    fn parse_identifier(&mut self, start: usize) -> Result<PathSegment, PathError> {
        let mut name = String::new();
        while let Some(&(position, ch)) = self.chars.peek() {
            match ch {
                '.' | '[' => break,
                ']' => return Err(self.unexpected(ch, position)),
                _ => {
                    name.push(ch);
                    self.chars.next();
                }
            }
        }

        if name.is_empty() {
            return Err(PathError::EmptySegment {
                position: start,
                input: self.input.to_string(),
            });
        }
        Ok(PathSegment::Key(name))
    }

    /// Parse the body of `[...]`; the opening bracket is already consumed
    fn parse_bracket(&mut self, open: usize) -> Result<PathSegment, PathError> {
        if let Some(&(_, quote @ ('"' | '\''))) = self.chars.peek() {
            self.chars.next();
            let key = self.parse_quoted(quote, open)?;
            return match self.chars.next() {
                Some((_, ']')) => Ok(PathSegment::Key(key)),
                Some((position, found)) => Err(self.unexpected(found, position)),
                None => Err(self.unterminated(open)),
            };
        }

        let mut content = String::new();
        loop {
            match self.chars.next() {
                Some((_, ']')) => break,
                Some((_, ch)) => content.push(ch),
                None => return Err(self.unterminated(open)),
            }
        }

        if content.is_empty() {
            return Err(PathError::EmptySegment {
                position: open + 1,
                input: self.input.to_string(),
            });
        }

        if content.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = content.parse::<usize>() {
                return Ok(PathSegment::Index(index));
            }
        }
        Ok(PathSegment::Key(content))
    }

    fn parse_quoted(&mut self, quote: char, open: usize) -> Result<String, PathError> {
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => return Err(self.unterminated(open)),
                },
                Some((_, ch)) if ch == quote => return Ok(value),
                Some((_, ch)) => value.push(ch),
                None => return Err(self.unterminated(open)),
            }
        }
    }

    fn unexpected(&self, found: char, position: usize) -> PathError {
        PathError::UnexpectedChar {
            found,
            position,
            input: self.input.to_string(),
        }
    }

    fn unterminated(&self, position: usize) -> PathError {
        PathError::UnterminatedBracket {
            position,
            input: self.input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(input: &str) -> FieldPath {
        FieldPath::parse(input).unwrap()
    }

    #[test]
    fn test_parse_dotted_and_bracketed() {
        assert_eq!(
            path("a.b[0]['x.y']").segments(),
            &[
                PathSegment::Key("a".into()),
                PathSegment::Key("b".into()),
                PathSegment::Index(0),
                PathSegment::Key("x.y".into()),
            ]
        );
        assert_eq!(path("[3]").segments(), &[PathSegment::Index(3)]);
        assert_eq!(
            path("a[b]").segments(),
            &[PathSegment::Key("a".into()), PathSegment::Key("b".into())]
        );
    }

    #[test]
    fn test_parse_root_forms() {
        assert!(path("").is_root());
        assert!(path("$").is_root());
        assert_eq!(path("$.a.b"), path("a.b"));
        assert_eq!(path("$[1]"), path("[1]"));
        // `$` only marks the root when a delimiter follows
        assert_eq!(path("$ref").segments(), &[PathSegment::Key("$ref".into())]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            FieldPath::parse("a..b"),
            Err(PathError::EmptySegment { position: 2, .. })
        ));
        assert!(matches!(
            FieldPath::parse("a."),
            Err(PathError::EmptySegment { .. })
        ));
        assert!(matches!(
            FieldPath::parse("a[0"),
            Err(PathError::UnterminatedBracket { position: 1, .. })
        ));
        assert!(matches!(
            FieldPath::parse("a['b]"),
            Err(PathError::UnterminatedBracket { .. })
        ));
        assert!(matches!(
            FieldPath::parse("a[]"),
            Err(PathError::EmptySegment { .. })
        ));
        assert!(matches!(
            FieldPath::parse("a[0]b"),
            Err(PathError::UnexpectedChar { found: 'b', position: 4, .. })
        ));
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["", "a", "a.b[0].c", "meta[\"content.type\"]", "[0][1]", "x[\"a\\\"b\"]"] {
            let parsed = path(input);
            assert_eq!(parsed.to_string(), input);
            assert_eq!(path(&parsed.to_string()), parsed);
        }
    }

    #[test]
    fn test_ancestry_is_segment_prefix() {
        assert!(path("a.b.c").starts_with(&path("a.b")));
        assert!(path("a.b[0]").starts_with(&path("a.b")));
        assert!(path("a.b").starts_with(&path("a.b")));
        assert!(path("a").starts_with(&FieldPath::root()));
        assert!(!path("abc").starts_with(&path("ab")));
        assert!(!path("a.bc").starts_with(&path("a.b")));

        assert!(path("a.b").is_related_to(&path("a.b.c")));
        assert!(path("a.b.c").is_related_to(&path("a.b")));
        assert!(!path("a.b").is_related_to(&path("x.y")));
    }

    #[test]
    fn test_lookup() {
        let data = json!({
            "name": "form",
            "items": [{"id": 1}, {"id": 2}],
            "empty": null,
            "by_number": {"7": "seven"}
        });

        assert_eq!(path("items[1].id").lookup(&data), Some(&json!(2)));
        assert_eq!(path("items.0.id").lookup(&data), Some(&json!(1)));
        assert_eq!(path("by_number[7]").lookup(&data), Some(&json!("seven")));
        assert_eq!(path("empty").lookup(&data), Some(&Value::Null));
        assert_eq!(FieldPath::root().lookup(&data), Some(&data));
        assert_eq!(path("items[5]").lookup(&data), None);
        assert_eq!(path("name.first").lookup(&data), None);
    }

    #[test]
    fn test_parent_and_children() {
        let p = FieldPath::root().child("a").child_index(2).child("b");
        assert_eq!(p.to_string(), "a[2].b");
        assert_eq!(p.parent().map(|p| p.to_string()), Some("a[2]".to_string()));
        assert_eq!(p.last(), Some(&PathSegment::Key("b".into())));
        assert_eq!(FieldPath::root().parent(), None);
    }

    #[test]
    fn test_parse_or_key_falls_back() {
        assert_eq!(FieldPath::parse_or_key("a..b").segments(), &[PathSegment::Key("a..b".into())]);
        assert_eq!(FieldPath::parse_or_key("a.b").len(), 2);
    }

    #[test]
    fn test_serde_as_string() {
        let p = path("a.b[1]");
        let encoded = serde_json::to_string(&p).unwrap();
        assert_eq!(encoded, "\"a.b[1]\"");
        let decoded: FieldPath = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, p);
        assert!(serde_json::from_str::<FieldPath>("\"a[\"").is_err());
    }
}
