//! The four shorthand notations and their compilation into a [`Predicate`].

use std::collections::BTreeMap;

use keypath_core::{Path, ToPath, Value};

use crate::predicate::{identity, matches, matches_property, property, Predicate};
use crate::PredicateError;

/// A caller-facing predicate notation.
///
/// | Variant | Compiles to |
/// |---|---|
/// | `Function(p)` | `p` itself |
/// | `Property(path)` | `v -> get(v, path)` (an extractor) |
/// | `Matches(source)` | every key of `source` loosely equals `v`'s |
/// | `MatchesProperty(path, value)` | `get(v, path)` loosely equals `value` |
#[derive(Clone, Debug)]
pub enum Shorthand {
    Function(Predicate),
    Property(Path),
    Matches(BTreeMap<String, Value>),
    MatchesProperty(Path, Value),
}

impl Shorthand {
    /// Wrap a closure as an already-compiled shorthand.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Shorthand::Function(Predicate::new(f))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shorthand::Function(_) => "function",
            Shorthand::Property(_) => "property",
            Shorthand::Matches(_) => "matches",
            Shorthand::MatchesProperty(_, _) => "matches-property",
        }
    }
}

impl From<Predicate> for Shorthand {
    fn from(predicate: Predicate) -> Self {
        Shorthand::Function(predicate)
    }
}

impl From<Path> for Shorthand {
    fn from(path: Path) -> Self {
        Shorthand::Property(path)
    }
}

impl From<&str> for Shorthand {
    fn from(path: &str) -> Self {
        Shorthand::Property(Path::parse(path))
    }
}

impl From<String> for Shorthand {
    fn from(path: String) -> Self {
        Shorthand::Property(Path::parse(&path))
    }
}

impl From<BTreeMap<String, Value>> for Shorthand {
    fn from(source: BTreeMap<String, Value>) -> Self {
        Shorthand::Matches(source)
    }
}

impl<P: ToPath, V: Into<Value>> From<(P, V)> for Shorthand {
    fn from((path, value): (P, V)) -> Self {
        Shorthand::MatchesProperty(path.to_path().into_owned(), value.into())
    }
}

impl TryFrom<Value> for Shorthand {
    type Error = PredicateError;

    /// Recognize a shorthand held in a dynamic value.
    ///
    /// A two-element array is a `[path, value]` pair; any other array, a
    /// string or an integer is a property path; a map is a partial-match
    /// source.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(_) | Value::Integer(_) => Ok(Shorthand::Property(Path::try_from(&value)?)),
            Value::Map(source) => Ok(Shorthand::Matches(source)),
            Value::Array(mut items) if items.len() == 2 => {
                let expected = items.pop().unwrap_or_default();
                let path = Path::try_from(&items[0])?;
                Ok(Shorthand::MatchesProperty(path, expected))
            }
            Value::Array(items) => Ok(Shorthand::Property(Path::try_from(&Value::Array(items))?)),
            other => Err(PredicateError::UnsupportedShorthand {
                found: other.type_name(),
            }),
        }
    }
}

/// Compile a shorthand into a single predicate.
///
/// ```rust
/// use collection_literals::btree;
/// use keypath_core::Value;
/// use keypath_predicate::compile;
///
/// let object = Value::Map(btree! {
///     "a".to_string() => Value::Integer(1),
///     "b".to_string() => Value::Integer(2),
/// });
/// assert!(compile(btree! { "a".to_string() => Value::Integer(1) }).test(&object));
/// assert!(compile(("a", 1i64)).test(&object));
/// assert_eq!(compile("b").call(&object), Value::Integer(2));
/// ```
pub fn compile(shorthand: impl Into<Shorthand>) -> Predicate {
    let shorthand = shorthand.into();
    log::trace!("compiling {} shorthand", shorthand.kind());
    match shorthand {
        Shorthand::Function(predicate) => predicate,
        Shorthand::Property(path) => property(path),
        Shorthand::Matches(source) => matches(source),
        Shorthand::MatchesProperty(path, value) => matches_property(path, value),
    }
}

/// Compile a shorthand held in a dynamic value.
pub fn compile_value(value: Value) -> Result<Predicate, PredicateError> {
    Shorthand::try_from(value).map(compile)
}

/// Compile an optional shorthand, defaulting to [`identity`].
pub fn iteratee(shorthand: Option<Shorthand>) -> Predicate {
    shorthand.map(compile).unwrap_or_else(identity)
}
