use serde_json::{Map, Value};

/// In-memory settings document: top-level key to JSON value.
pub type Settings = Map<String, Value>;

/// Structural equality for settings values.
///
/// Arrays compare element by element and objects key by key. Numbers compare
/// by numeric value so an editor writing `150.0` does not count as a change
/// from `150`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, a)| y.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => a == b,
    }
}

/// Like [`values_equal`] but treats an absent current value as different.
pub fn differs(current: Option<&Value>, incoming: &Value) -> bool {
    current.is_none_or(|current| !values_equal(current, incoming))
}
