//! Lenient serde helpers for documents written without schema enforcement
//!
//! Older terminals wrote amounts as strings, some left fields `null`, and
//! timestamps appear both as ISO-8601 strings and Unix millis. None of that
//! may turn into `NaN` or a hard decode failure for the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value into a finite `f64`, falling back to `0.0`
pub fn number_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Deserialize an amount; null, missing, non-numeric and non-finite become 0
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)
        .map(|opt| opt.as_ref().map(number_or_zero).unwrap_or(0.0))
}

/// Deserialize a unit count; fractional values round, negatives clamp to 0
pub fn quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = amount(deserializer)?;
    if raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.round().min(u32::MAX as f64) as u32)
}

/// Deserialize any `Default` type; null or a value of the wrong shape
/// becomes the default
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match serde_json::from_value(v) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("Defaulting malformed field: {}", e);
                None
            }
        })
        .unwrap_or_default())
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize free text; numbers and booleans are stringified, anything
/// else becomes empty
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)
        .map(|opt| opt.and_then(scalar_text).unwrap_or_default())
}

/// Like [`text`], keeping absence as `None`
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|opt| opt.and_then(scalar_text))
}

/// Deserialize a list element by element
///
/// A non-array value yields an empty list; elements that fail to decode are
/// dropped while the rest are kept.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(other) => {
            tracing::debug!("Expected a list, got {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("Dropping malformed list element: {}", e);
                None
            }
        })
        .collect())
}

/// Deserialize a timestamp written either as a string or as Unix millis
///
/// Millis are normalized to RFC 3339 (UTC). Blank strings become `None`.
/// Strings are kept verbatim; interpretation against the business time zone
/// happens in [`crate::util::parse_timestamp`].
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64));
            let parsed = millis.and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis);
            if parsed.is_none() {
                tracing::debug!("Dropping out-of-range timestamp {}", n);
            }
            parsed.map(|dt| dt.to_rfc3339())
        }
        _ => None,
    })
}
