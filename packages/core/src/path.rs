//! Path compilation: raw dot/bracket strings and segment lists into a
//! normalized sequence of map-key and sequence-index steps.

use std::borrow::Cow;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::Value;

/// Errors raised when a dynamic value cannot be compiled into a path.
///
/// String and segment-list paths always compile; only [`Path::try_from`] on a
/// [`Value`] can fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("a {found} value cannot be used as a path")]
    NotAPath { found: &'static str },
    #[error("path element #{position} is a {found} value, expected a scalar")]
    InvalidSegment {
        position: usize,
        found: &'static str,
    },
}

/// One step of a [`Path`].
///
/// A segment addresses containers with JS-style property-key semantics: a map
/// is addressed by the segment's text (`Index(3)` reads key `"3"`), a sequence
/// by its index form (`Key("3")` reads element 3, `Key("x")` reads nothing).
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into())
    }

    pub fn index(index: usize) -> Self {
        Segment::Index(index)
    }

    /// The position this segment addresses in a sequence, if any.
    ///
    /// `Index(n)` always has one; a `Key` has one only when its text is a
    /// canonical non-negative integer (`"7"`, not `"07"` or `"-1"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) => parse_index(k),
        }
    }

    /// The key this segment addresses in a map.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(k) => Cow::Borrowed(k.as_str()),
            Segment::Index(i) => Cow::Owned(i.to_string()),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    fn is_empty(&self) -> bool {
        matches!(self, Segment::Key(k) if k.is_empty())
    }
}

/// Parse a canonical non-negative decimal integer.
pub(crate) fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        match parse_index(s) {
            Some(i) => Segment::Index(i),
            None => Segment::Key(s.to_string()),
        }
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        match parse_index(&s) {
            Some(i) => Segment::Index(i),
            None => Segment::Key(s),
        }
    }
}

impl From<&String> for Segment {
    fn from(s: &String) -> Self {
        Segment::from(s.as_str())
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

impl From<u32> for Segment {
    fn from(i: u32) -> Self {
        Segment::Index(i as usize)
    }
}

impl From<i64> for Segment {
    fn from(i: i64) -> Self {
        match usize::try_from(i) {
            Ok(i) => Segment::Index(i),
            Err(_) => Segment::Key(i.to_string()),
        }
    }
}

impl From<i32> for Segment {
    fn from(i: i32) -> Self {
        Segment::from(i as i64)
    }
}

/// A compiled path: an ordered, immutable sequence of non-empty segments.
///
/// The empty path addresses the root itself.
///
/// # Path Syntax
///
/// - `.` separates keys: `a.b.c`
/// - `[digits]` is a sequence index: `a[0]`
/// - `["text"]`, `['text']` and `[text]` are keys, and may contain `.`;
///   inside quotes a backslash escapes the next character (`["a\\"b"]`)
/// - Repeated, leading and trailing delimiters are ignored
///
/// ```rust
/// use keypath_core::{Path, Segment};
///
/// let path = Path::parse("a.b[0].c");
/// assert_eq!(
///     path.segments(),
///     &[
///         Segment::key("a"),
///         Segment::key("b"),
///         Segment::index(0),
///         Segment::key("c"),
///     ]
/// );
/// assert_eq!(Path::parse("..a..b."), Path::parse("a.b"));
/// ```
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Segment>,
}

lazy_static! {
    static ref PATH_TOKEN: Regex = Regex::new(
        r#"(?x)
            \[ (?P<index>[0-9]+) \] |
            \[ " (?P<double>(?:[^"\\]|\\.)*) " \] |
            \[ ' (?P<single>(?:[^'\\]|\\.)*) ' \] |
            \[ (?P<bracketed>[^\]]*) \] |
            (?P<dotted>[^.\[\]]+)
        "#
    )
    .expect("path token pattern is valid");
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Path::default()
    }

    /// Compile a dot/bracket path string.
    ///
    /// Never fails: unbalanced brackets and stray delimiters are boundaries,
    /// not errors.
    pub fn parse(s: &str) -> Self {
        let segments: Vec<Segment> = PATH_TOKEN
            .captures_iter(s)
            .filter_map(|captures| {
                if let Some(m) = captures.name("index") {
                    return Some(match parse_index(m.as_str()) {
                        Some(i) => Segment::Index(i),
                        None => Segment::Key(m.as_str().to_string()),
                    });
                }
                if let Some(m) = captures.name("double").or_else(|| captures.name("single")) {
                    return Some(Segment::Key(unescape(m.as_str())));
                }
                ["bracketed", "dotted"]
                    .iter()
                    .find_map(|name| captures.name(name))
                    .map(|m| Segment::Key(m.as_str().to_string()))
            })
            .filter(|segment| !segment.is_empty())
            .collect();

        log::trace!("compiled path {:?} into {} segments", s, segments.len());
        Path { segments }
    }

    /// Build a path from segment-like values.
    ///
    /// Strings that are canonical non-negative integers become indices, as do
    /// non-negative integers. Empty strings are dropped.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Path {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|segment: &Segment| !segment.is_empty())
                .collect(),
        }
    }

    /// Check if this path is empty (root path).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The final segment and the segments leading to it.
    pub fn split_last(&self) -> Option<(&Segment, &[Segment])> {
        self.segments.split_last()
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }

    /// Extend this path by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<Segment>) -> Path {
        let mut path = self.clone();
        let segment = segment.into();
        if !segment.is_empty() {
            path.segments.push(segment);
        }
        path
    }

    /// Check if this path has the given prefix.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        prefix.segments.len() <= self.segments.len()
            && prefix.segments == self.segments[..prefix.segments.len()]
    }
}

/// Renders the canonical dot/bracket form, which parses back to the same path.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::Key(key) if is_plain_key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                Segment::Key(key) => write!(f, "[\"{}\"]", escape(key))?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', ']'])
}

/// Backslash-escape `\` and `"` for the double-quoted bracket form.
fn escape(key: &str) -> Cow<'_, str> {
    if !key.contains(['\\', '"']) {
        return Cow::Borrowed(key);
    }
    let mut escaped = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Inverse of [`escape`]: a backslash takes the next character literally.
fn unescape(quoted: &str) -> String {
    let mut key = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => key.extend(chars.next()),
            c => key.push(c),
        }
    }
    key
}

impl std::ops::Index<usize> for Path {
    type Output = Segment;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

impl From<Segment> for Path {
    fn from(segment: Segment) -> Self {
        Path::from_segments([segment])
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl TryFrom<&Value> for Path {
    type Error = PathError;

    /// Compile a path held in a dynamic value: a path string, a single
    /// integer, or an array of scalar segment-likes.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Path::parse(s)),
            Value::Integer(i) => Ok(Path::from(Segment::from(*i))),
            Value::Array(items) => {
                let segments = items
                    .iter()
                    .enumerate()
                    .map(|(position, item)| scalar_segment(item, position))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Path::from_segments(segments))
            }
            other => Err(PathError::NotAPath {
                found: other.type_name(),
            }),
        }
    }
}

fn scalar_segment(value: &Value, position: usize) -> Result<Segment, PathError> {
    match value {
        Value::String(s) => Ok(Segment::from(s.as_str())),
        Value::Integer(i) => Ok(Segment::from(*i)),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 && *f >= 0.0 => {
            Ok(Segment::Index(*f as usize))
        }
        Value::Float(f) => Ok(Segment::Key(f.to_string())),
        Value::Bool(b) => Ok(Segment::Key(b.to_string())),
        Value::Null => Ok(Segment::Key("null".to_string())),
        other => Err(PathError::InvalidSegment {
            position,
            found: other.type_name(),
        }),
    }
}

/// Anything accepted as a raw path by the accessors.
///
/// Strings are parsed with [`Path::parse`]; sequences of segment-likes go
/// through [`Path::from_segments`]; a [`Path`] is used as-is.
pub trait ToPath {
    fn to_path(&self) -> Cow<'_, Path>;
}

impl ToPath for Path {
    fn to_path(&self) -> Cow<'_, Path> {
        Cow::Borrowed(self)
    }
}

impl ToPath for str {
    fn to_path(&self) -> Cow<'_, Path> {
        Cow::Owned(Path::parse(self))
    }
}

impl ToPath for String {
    fn to_path(&self) -> Cow<'_, Path> {
        Cow::Owned(Path::parse(self))
    }
}

impl ToPath for Segment {
    fn to_path(&self) -> Cow<'_, Path> {
        Cow::Owned(Path::from(self.clone()))
    }
}

impl ToPath for usize {
    fn to_path(&self) -> Cow<'_, Path> {
        Cow::Owned(Path::from(Segment::Index(*self)))
    }
}

impl<S: Clone + Into<Segment>> ToPath for [S] {
    fn to_path(&self) -> Cow<'_, Path> {
        Cow::Owned(Path::from_segments(self.iter().cloned()))
    }
}

impl<S: Clone + Into<Segment>, const N: usize> ToPath for [S; N] {
    fn to_path(&self) -> Cow<'_, Path> {
        self.as_slice().to_path()
    }
}

impl<S: Clone + Into<Segment>> ToPath for Vec<S> {
    fn to_path(&self) -> Cow<'_, Path> {
        self.as_slice().to_path()
    }
}

impl<T: ToPath + ?Sized> ToPath for &T {
    fn to_path(&self) -> Cow<'_, Path> {
        (**self).to_path()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Path, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        Ok(Path::parse(&s))
    }
}

/// Macro for compiling a path literal.
///
/// # Example
///
/// ```rust
/// use keypath_core::path;
///
/// let p = path!("users[123].name");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}
