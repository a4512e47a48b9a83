use log::*;
use serde_json::Value;

/// True if every field given in `expected` is present in `actual` with the same value. Fields of `actual` that
/// `expected` does not mention are ignored, at any depth. Arrays must match element by element.
pub fn json_contains(actual: &Value, expected: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(wanted), Value::Object(found)) => wanted.iter().all(|(key, value)| match found.get(key) {
            Some(v) => json_contains(v, value),
            None => {
                debug!("Missing key {key} in {actual}");
                false
            },
        }),
        (Value::Array(wanted), Value::Array(found)) => {
            wanted.len() == found.len() && wanted.iter().zip(found).all(|(w, f)| json_contains(f, w))
        },
        (wanted, found) => {
            let same = wanted == found;
            if !same {
                debug!("{found} does not match {wanted}");
            }
            same
        },
    }
}

/// As [`json_contains`], for JSON text. Unparseable input never matches.
pub fn json_text_contains(actual: &str, expected: &str) -> bool {
    match (serde_json::from_str::<Value>(actual), serde_json::from_str::<Value>(expected)) {
        (Ok(a), Ok(e)) => json_contains(&a, &e),
        (a, e) => {
            warn!("Could not compare JSON. Actual: {:?}, expected: {:?}", a.err(), e.err());
            false
        },
    }
}
