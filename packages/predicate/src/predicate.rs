//! The compiled predicate type and the shorthand constructors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use keypath_core::{get, same_value_zero, Path, Segment, ToPath, Value};

/// A one-argument function over values.
///
/// Tests return `Value::Bool`; extractors (such as [`property`]) return
/// whatever they project. [`Predicate::test`] reads any result through
/// truthiness, so both kinds can drive filtering.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> Value + Send + Sync>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Predicate(Arc::new(f))
    }

    /// Wrap a boolean test.
    pub fn from_test<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Predicate::new(move |value| Value::Bool(f(value)))
    }

    /// Apply the predicate and return its projection.
    pub fn call(&self, value: &Value) -> Value {
        (self.0)(value)
    }

    /// Apply the predicate and read the result as a boolean.
    pub fn test(&self, value: &Value) -> bool {
        self.call(value).is_truthy()
    }

    /// Whether both handles share the same underlying function.
    pub fn ptr_eq(&self, other: &Predicate) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Returns its argument.
pub fn identity() -> Predicate {
    Predicate::new(Value::clone)
}

/// Ignores its argument and returns `value`.
pub fn constant(value: Value) -> Predicate {
    Predicate::new(move |_| value.clone())
}

/// Inverts the truthiness of `predicate`.
pub fn negate(predicate: Predicate) -> Predicate {
    Predicate::from_test(move |value| !predicate.test(value))
}

/// Extracts the value at `path` from its argument (`Null` when unreachable).
///
/// The path is compiled once, here.
pub fn property(path: impl ToPath) -> Predicate {
    let path = path.to_path().into_owned();
    Predicate::new(move |value| get(value, &path).cloned().unwrap_or_default())
}

/// The inverse of [`property`]: the argument is a path into `root`.
///
/// Arguments that are not path-like yield `Null`.
pub fn property_of(root: Value) -> Predicate {
    Predicate::new(move |raw| match Path::try_from(raw) {
        Ok(path) => get(&root, &path).cloned().unwrap_or_default(),
        Err(_) => Value::Null,
    })
}

/// The value `object` owns directly under `key`.
fn own_value<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    match object {
        Value::Map(map) => map.get(key),
        Value::Array(arr) => arr.get(Segment::from(key).as_index()?),
        _ => None,
    }
}

/// Check that `object` holds a loosely-equal value for every key of `source`.
///
/// Equality is [`same_value_zero`]. An empty `source` matches anything.
pub fn is_match(object: &Value, source: &BTreeMap<String, Value>) -> bool {
    source.iter().all(|(key, expected)| {
        own_value(object, key).is_some_and(|actual| same_value_zero(actual, expected))
    })
}

/// Tests its argument against every key/value pair of `source`.
pub fn matches(source: BTreeMap<String, Value>) -> Predicate {
    Predicate::from_test(move |value| is_match(value, &source))
}

/// Tests that the value at `path` is loosely equal to `expected`.
pub fn matches_property(path: impl ToPath, expected: Value) -> Predicate {
    let path = path.to_path().into_owned();
    Predicate::from_test(move |value| {
        get(value, &path).is_some_and(|actual| same_value_zero(actual, &expected))
    })
}
