//! Path addressing for document nodes.
//!
//! A [`Path`] is the segment sequence from the document root to a node. A
//! [`PathKey`] is its canonical string identity, used to key diff results
//! and to label nodes for humans:
//!
//! | Segment                       | Rendering      |
//! |-------------------------------|----------------|
//! | root                          | `$`            |
//! | `Key("id")` (bare identifier) | `.id`          |
//! | `Key("a b")`                  | `["a b"]`      |
//! | `Index(3)`                    | `[3]`          |
//!
//! Keys that are not bare identifiers (`^[A-Za-z_$][A-Za-z0-9_$]*$`) render
//! as JSON string literals, so `Key("0")` (`$["0"]`) never collides with
//! `Index(0)` (`$[0]`). [`PathKey::parse`] inverts [`canonicalize`].

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::DiffError;

/// A single step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Location of a node inside a document. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.0.pop()
    }

    /// A new path one key deeper.
    pub fn child_key(&self, key: &str) -> Path {
        let mut child = self.clone();
        child.push(key);
        child
    }

    /// A new path one index deeper.
    pub fn child_index(&self, index: usize) -> Path {
        let mut child = self.clone();
        child.push(index);
        child
    }

    /// `true` when `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn to_key(&self) -> PathKey {
        canonicalize(self)
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(canonicalize(self).as_str())
    }
}

/// Canonical, collision-free identity of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
    /// Rendering of the document root.
    pub const ROOT: &'static str = "$";

    pub fn root() -> Self {
        PathKey(Self::ROOT.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Recover the segment sequence from a canonical key.
    ///
    /// Only strings produced by [`canonicalize`] are accepted; `$['a']`,
    /// `$["a"]` (bare identifiers must use dot notation) and `$[01]` are
    /// rejected so that every path has exactly one key.
    pub fn parse(key: &str) -> Result<Path, DiffError> {
        let invalid = |offset: usize, message: &str| DiffError::InvalidPathKey {
            key: key.to_string(),
            offset,
            message: message.to_string(),
        };

        let bytes = key.as_bytes();
        if bytes.first() != Some(&b'$') {
            return Err(invalid(0, "expected '$'"));
        }

        let mut path = Path::root();
        let mut pos = 1;
        while pos < bytes.len() {
            match bytes[pos] {
                b'.' => {
                    let start = pos + 1;
                    let mut end = start;
                    while end < bytes.len() && is_identifier_byte(bytes[end]) {
                        end += 1;
                    }
                    if end == start {
                        return Err(invalid(start, "expected identifier"));
                    }
                    path.push(&key[start..end]);
                    pos = end;
                }
                b'[' if bytes.get(pos + 1) == Some(&b'"') => {
                    let start = pos + 1;
                    let end = closing_quote(bytes, start + 1)
                        .ok_or_else(|| invalid(start, "unterminated string"))?;
                    let literal: String = serde_json::from_str(&key[start..=end])
                        .map_err(|e| invalid(start, &e.to_string()))?;
                    if bytes.get(end + 1) != Some(&b']') {
                        return Err(invalid(end + 1, "expected ']'"));
                    }
                    path.push(literal);
                    pos = end + 2;
                }
                b'[' => {
                    let start = pos + 1;
                    let mut end = start;
                    while end < bytes.len() && bytes[end].is_ascii_digit() {
                        end += 1;
                    }
                    let index: usize = key[start..end]
                        .parse()
                        .map_err(|_| invalid(start, "expected index"))?;
                    if bytes.get(end) != Some(&b']') {
                        return Err(invalid(end, "expected ']'"));
                    }
                    path.push(index);
                    pos = end + 1;
                }
                _ => return Err(invalid(pos, "expected '.' or '['")),
            }
        }

        if canonicalize(&path).as_str() != key {
            return Err(invalid(0, "not in canonical form"));
        }
        Ok(path)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&Path> for PathKey {
    fn from(path: &Path) -> Self {
        canonicalize(path)
    }
}

impl Serialize for PathKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Produce the canonical key of `path`. Pure and total.
pub fn canonicalize(path: &Path) -> PathKey {
    let mut out = String::from(PathKey::ROOT);
    for segment in path.segments() {
        match segment {
            Segment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
            Segment::Key(k) if is_identifier(k) => {
                out.push('.');
                out.push_str(k);
            }
            Segment::Key(k) => {
                out.push('[');
                push_string_literal(&mut out, k);
                out.push(']');
            }
        }
    }
    PathKey(out)
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
    })
}

/// Keys renderable in `.key` notation.
pub fn is_identifier(key: &str) -> bool {
    identifier_regex().is_match(key)
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Index of the quote closing a string literal whose body starts at `from`.
fn closing_quote(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// JSON string literal, escaped exactly as serde_json escapes.
fn push_string_literal(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}
