//! Dotted property paths over nested JSON objects.
//!
//! `"contact.email"` addresses `target["contact"]["email"]`. Segments are
//! plain object keys: there is no array indexing and no escaping of literal
//! dots.

use serde_json::{Map, Value};

/// Reads the value at `path`.
///
/// Returns `None` when any segment is missing, or when an intermediate value
/// is falsy (`null`, `false`, `0`, `""`).
#[must_use]
pub fn get<'a>(object: &'a Value, path: &str) -> Option<&'a Value> {
    match path.split_once('.') {
        None => object.get(path),
        Some((head, tail)) => {
            let nested = object.get(head)?;
            if is_falsy(nested) {
                return None;
            }
            get(nested, tail)
        }
    }
}

/// Writes `value` at `path`, creating empty objects for missing or `null`
/// intermediate segments.
///
/// Returns false, leaving `object` untouched, when the root or an existing
/// intermediate value is not an object.
pub fn set(object: &mut Value, path: &str, value: Value) -> bool {
    let Value::Object(map) = object else {
        return false;
    };

    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
            true
        }
        Some((head, tail)) => {
            let nested = map
                .entry(head)
                .or_insert_with(|| Value::Object(Map::new()));
            if nested.is_null() {
                *nested = Value::Object(Map::new());
            }
            set(nested, tail, value)
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
