//! Tolerant field readers for Cucumber JSON.
//!
//! Formatters disagree on field types (behave writes descriptions as line
//! lists, some emit explicit nulls). A field with an unexpected shape falls
//! back to its default instead of rejecting the whole feature.

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Text form of a scalar or a list of lines; `None` for null and objects.
pub(crate) fn text(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Array(lines) => Some(
            lines
                .into_iter()
                .filter_map(text)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        JsonValue::Null | JsonValue::Object(_) => None,
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(JsonValue::deserialize(deserializer)
        .map(text)?
        .unwrap_or_default())
}

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(text)
}

pub(crate) fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let strings = match JsonValue::deserialize(deserializer)? {
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| text(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(strings)
}

pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(JsonValue::deserialize(deserializer)?
        .as_bool()
        .unwrap_or(false))
}

pub(crate) fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(JsonValue::deserialize(deserializer)?.as_u64())
}

/// A list, with `null` read as empty. Entries must still match `T`.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept integer or float durations; anything else (or negative) is 0.
///
/// Floats beyond `u64::MAX` saturate.
pub(crate) fn duration<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let duration = match JsonValue::deserialize(deserializer)? {
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    };
    Ok(duration)
}
