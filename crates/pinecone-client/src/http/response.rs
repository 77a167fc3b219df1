//! Response classification.
//!
//! Every response from every facade goes through [`classify`], so the
//! mapping from status code and body to a result is identical everywhere.

use serde_json::{Map, Value};

use crate::error::{DEFAULT_ERROR_MESSAGE, Error, Result};

/// Turns an HTTP status code and raw body into a decoded value or an error.
///
/// - `status < 400`: an empty body (or JSON `null`) decodes to an empty
///   object; anything else must be valid JSON or [`Error::Decode`] is
///   returned.
/// - `status >= 400`: the body is parsed leniently (invalid JSON becomes an
///   empty object) and mapped to [`Error::Auth`] for 401/403,
///   [`Error::Timeout`] for 408/504 and [`Error::Api`] otherwise.
pub fn classify(status_code: u16, body: &str) -> Result<Value> {
    if status_code < 400 {
        return decode_success(body);
    }

    let data = serde_json::from_str::<Value>(body).unwrap_or_else(|_| empty_object());
    let message = error_message(&data);

    Err(match status_code {
        401 | 403 => Error::Auth {
            status_code,
            message,
        },
        408 | 504 => Error::Timeout {
            status_code: Some(status_code),
            message,
            source: None,
        },
        _ => Error::Api {
            status_code,
            message,
            body: data,
        },
    })
}

fn decode_success(body: &str) -> Result<Value> {
    if body.is_empty() {
        return Ok(empty_object());
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Null => Ok(empty_object()),
        value => Ok(value),
    }
}

/// Extracts a human-readable message from an error body.
///
/// Lookup order: `message`, `error.message`, `error`, then the fixed
/// fallback. Non-string values are JSON-encoded.
fn error_message(data: &Value) -> String {
    let present = |value: &&Value| !value.is_null();

    data.get("message")
        .filter(present)
        .or_else(|| {
            data.get("error")
                .and_then(|error| error.get("message"))
                .filter(present)
        })
        .or_else(|| data.get("error").filter(present))
        .map(|value| match value {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned())
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Removes `key` from a decoded object, returning its array items.
///
/// Missing keys and non-array values yield an empty vector.
pub(crate) fn take_array(value: Value, key: &str) -> Vec<Value> {
    match take(value, key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn take(value: Value, key: &str) -> Option<Value> {
    match value {
        Value::Object(mut fields) => fields.remove(key),
        _ => None,
    }
}
