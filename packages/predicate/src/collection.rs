//! Collection helpers driven by a shorthand.
//!
//! A collection is an array (its elements) or a map (its values, in key
//! order). Any other value is an empty collection. Every helper accepts any of
//! the four shorthand forms and compiles it once per call.

use std::collections::BTreeMap;

use keypath_core::Value;

use crate::{compile, Shorthand};

fn elements(collection: &Value) -> Box<dyn DoubleEndedIterator<Item = &Value> + '_> {
    match collection {
        Value::Array(arr) => Box::new(arr.iter()),
        Value::Map(map) => Box::new(map.values()),
        _ => Box::new(std::iter::empty()),
    }
}

/// The string a projection groups under, following the host's string coercion.
fn group_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) if f.is_nan() => "NaN".to_string(),
        Value::Float(f) if f.is_infinite() => {
            let sign = if *f > 0.0 { "" } else { "-" };
            format!("{}Infinity", sign)
        }
        Value::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => group_key(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Map(_) => "[object Object]".to_string(),
    }
}

/// Elements for which the predicate is truthy.
pub fn filter<'a>(collection: &'a Value, predicate: impl Into<Shorthand>) -> Vec<&'a Value> {
    let predicate = compile(predicate);
    elements(collection).filter(|v| predicate.test(v)).collect()
}

/// Elements for which the predicate is falsy.
pub fn reject<'a>(collection: &'a Value, predicate: impl Into<Shorthand>) -> Vec<&'a Value> {
    let predicate = compile(predicate);
    elements(collection).filter(|v| !predicate.test(v)).collect()
}

/// The first element for which the predicate is truthy.
pub fn find<'a>(collection: &'a Value, predicate: impl Into<Shorthand>) -> Option<&'a Value> {
    let predicate = compile(predicate);
    elements(collection).find(|v| predicate.test(v))
}

/// The last element for which the predicate is truthy.
pub fn find_last<'a>(collection: &'a Value, predicate: impl Into<Shorthand>) -> Option<&'a Value> {
    let predicate = compile(predicate);
    elements(collection).rev().find(|v| predicate.test(v))
}

/// Position of the first element for which the predicate is truthy.
pub fn find_index(collection: &Value, predicate: impl Into<Shorthand>) -> Option<usize> {
    let predicate = compile(predicate);
    elements(collection).position(|v| predicate.test(v))
}

/// Whether any element satisfies the predicate.
pub fn some(collection: &Value, predicate: impl Into<Shorthand>) -> bool {
    let predicate = compile(predicate);
    elements(collection).any(|v| predicate.test(v))
}

/// Whether every element satisfies the predicate. `true` for an empty collection.
pub fn every(collection: &Value, predicate: impl Into<Shorthand>) -> bool {
    let predicate = compile(predicate);
    elements(collection).all(|v| predicate.test(v))
}

/// Split into (truthy, falsy) elements.
pub fn partition<'a>(
    collection: &'a Value,
    predicate: impl Into<Shorthand>,
) -> (Vec<&'a Value>, Vec<&'a Value>) {
    let predicate = compile(predicate);
    elements(collection).partition(|v| predicate.test(v))
}

/// Project every element.
pub fn map(collection: &Value, iteratee: impl Into<Shorthand>) -> Vec<Value> {
    let iteratee = compile(iteratee);
    elements(collection).map(|v| iteratee.call(v)).collect()
}

/// Group elements by the string form of their projection.
pub fn group_by<'a>(
    collection: &'a Value,
    iteratee: impl Into<Shorthand>,
) -> BTreeMap<String, Vec<&'a Value>> {
    let iteratee = compile(iteratee);
    let mut groups: BTreeMap<String, Vec<&'a Value>> = BTreeMap::new();
    for v in elements(collection) {
        groups.entry(group_key(&iteratee.call(v))).or_default().push(v);
    }
    groups
}

/// Count elements by the string form of their projection.
pub fn count_by(collection: &Value, iteratee: impl Into<Shorthand>) -> BTreeMap<String, usize> {
    let iteratee = compile(iteratee);
    let mut counts = BTreeMap::new();
    for v in elements(collection) {
        *counts.entry(group_key(&iteratee.call(v))).or_insert(0) += 1;
    }
    counts
}

/// Index elements by the string form of their projection. Later elements win.
pub fn key_by<'a>(
    collection: &'a Value,
    iteratee: impl Into<Shorthand>,
) -> BTreeMap<String, &'a Value> {
    let iteratee = compile(iteratee);
    elements(collection)
        .map(|v| (group_key(&iteratee.call(v)), v))
        .collect()
}
