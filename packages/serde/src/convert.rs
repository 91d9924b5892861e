//! Conversions between Value and serde types.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use keypath_core::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Number, Value as Json};

use crate::Error;

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value_to_json(value)).map_err(|e| Error::decode(e.to_string()))
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
    Ok(json_to_value(json))
}

/// Parse JSON text into a Value.
pub fn from_json_str(text: &str) -> Result<Value, Error> {
    let json: Json = serde_json::from_str(text).map_err(|e| Error::decode(e.to_string()))?;
    Ok(json_to_value(json))
}

/// Render a Value as compact JSON text.
pub fn to_json_string(value: &Value) -> Result<String, Error> {
    serde_json::to_string(&value_to_json(value.clone())).map_err(|e| Error::encode(e.to_string()))
}

/// Convert a Value into its JSON form.
///
/// JSON has no bytes or non-finite numbers: bytes become base64 strings and
/// `NaN`/infinities become `null`.
pub fn value_to_json(value: Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(b),
        Value::Integer(i) => Json::from(i),
        Value::Float(f) => Number::from_f64(f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s),
        Value::Bytes(b) => Json::String(BASE64.encode(b)),
        Value::Array(items) => items.into_iter().map(value_to_json).collect(),
        Value::Map(entries) => Json::Object(
            entries
                .into_iter()
                .map(|(key, item)| (key, value_to_json(item)))
                .collect(),
        ),
    }
}

/// Convert a JSON document into a Value.
///
/// Numbers become `Integer` when they fit in an `i64`, `Float` otherwise.
pub fn json_to_value(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => number_to_value(&n),
        Json::String(s) => Value::String(s),
        Json::Array(items) => items.into_iter().map(json_to_value).collect(),
        Json::Object(entries) => entries
            .into_iter()
            .map(|(key, item)| (key, json_to_value(item)))
            .collect(),
    }
}

fn number_to_value(n: &Number) -> Value {
    n.as_i64()
        .map(Value::Integer)
        .or_else(|| n.as_f64().map(Value::Float))
        .unwrap_or_else(|| Value::String(n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keypath_core::{get, set, Path};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Account {
        owner: String,
        balance: i64,
        tags: Vec<String>,
    }

    #[test]
    fn roundtrip_struct() {
        let original = Account {
            owner: "barney".to_string(),
            balance: 12,
            tags: vec!["gold".to_string()],
        };

        let value = to_value(&original).unwrap();
        assert_eq!(get(&value, "tags[0]"), Some(&Value::from("gold")));

        let recovered: Account = from_value(value).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn edit_typed_data_by_path() {
        let mut value = to_value(&Account {
            owner: "fred".to_string(),
            balance: 0,
            tags: vec![],
        })
        .unwrap();

        set(&mut value, "tags[1]", Value::from("late"));
        let account: Result<Account, _> = from_value(value.clone());
        // Padding leaves a null at tags[0], which is not a String.
        assert!(matches!(account, Err(Error::Decode { .. })));

        set(&mut value, "tags[0]", Value::from("early"));
        let account: Account = from_value(value).unwrap();
        assert_eq!(account.tags, ["early", "late"]);
    }

    #[test]
    fn json_to_value_numbers() {
        let value = json_to_value(json!({
            "integer": 42,
            "float": 2.75,
            "negative": -100,
            "huge": u64::MAX,
        }));

        assert_eq!(get(&value, "integer"), Some(&Value::Integer(42)));
        assert_eq!(get(&value, "negative"), Some(&Value::Integer(-100)));
        assert_eq!(get(&value, "float"), Some(&Value::Float(2.75)));
        assert!(matches!(get(&value, "huge"), Some(Value::Float(_))));
    }

    #[test]
    fn value_to_json_nested() {
        let mut value = Value::map();
        set(&mut value, "a.b[0].c", Value::Integer(3));
        assert_eq!(value_to_json(value), json!({"a": {"b": [{"c": 3}]}}));
    }

    #[test]
    fn value_to_json_non_finite_becomes_null() {
        assert_eq!(value_to_json(Value::Float(f64::NAN)), Json::Null);
        assert_eq!(value_to_json(Value::Float(f64::INFINITY)), Json::Null);
    }

    #[test]
    fn value_to_json_bytes() {
        let json = value_to_json(Value::Bytes(vec![1, 2, 3, 4]));
        if let Json::String(s) = json {
            let decoded = BASE64.decode(&s).unwrap();
            assert_eq!(decoded, vec![1, 2, 3, 4]);
        } else {
            panic!("expected string");
        }
    }

    #[test]
    fn json_text() {
        let value = from_json_str(r#"{"a": [1, null, "x"]}"#).unwrap();
        assert_eq!(get(&value, "a[1]"), Some(&Value::Null));
        assert_eq!(to_json_string(&value).unwrap(), r#"{"a":[1,null,"x"]}"#);

        assert!(matches!(from_json_str("{"), Err(Error::Decode { .. })));
    }

    #[test]
    fn from_value_error() {
        let result: Result<Account, _> = from_value(Value::from("not a struct"));
        assert!(result.is_err());
    }

    #[test]
    fn to_value_primitives() {
        assert_eq!(to_value(&42i32).unwrap(), Value::Integer(42));
        assert_eq!(to_value(&"hello").unwrap(), Value::from("hello"));
        assert_eq!(to_value(&true).unwrap(), Value::Bool(true));
        assert_eq!(to_value(&None::<i32>).unwrap(), Value::Null);
    }

    #[test]
    fn paths_serialize_as_strings() {
        let path = Path::parse("a.b[0]['c.d']");
        let value = to_value(&path).unwrap();
        assert_eq!(value, Value::String(path.to_string()));

        let back: Path = from_value(value).unwrap();
        assert_eq!(back, path);
    }
}
