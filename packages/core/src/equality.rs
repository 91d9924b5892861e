//! Loose equality shared by partial-match predicates and the collection helpers.

use crate::Value;

/// SameValueZero equality, extended structurally to containers.
///
/// - Integers and floats compare by numeric value (`1 == 1.0`).
/// - `NaN` equals `NaN`; `0.0` equals `-0.0`.
/// - Strings, booleans and bytes compare structurally.
/// - Arrays compare element-wise and maps key-wise, recursively with the same
///   rule. Values of different shapes are never equal.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => floats_equal(*x, *y),
        (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
            floats_equal(*i as f64, *f) && f.fract() == 0.0 && (*f as i64) == *i
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| same_value_zero(l, r))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| same_value_zero(v, other)))
        }
        _ => false,
    }
}

fn floats_equal(x: f64, y: f64) -> bool {
    (x.is_nan() && y.is_nan()) || x == y
}
