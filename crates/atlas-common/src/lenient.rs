//! Lenient field decoders used at the HTTP boundary.
//!
//! The backend assembles workspace documents from LLM output, so optional
//! collections are sometimes missing, `null`, or the wrong JSON type. These
//! helpers coerce such fields instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

/// Coerce a JSON value into a sequence, dropping elements that do not decode.
pub(crate) fn coerce_vec<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<T>(item) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(error = %e, "Dropping malformed sequence element");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            warn!(found = kind_of(&other), "Expected a sequence; coercing to empty");
            Vec::new()
        }
    }
}

pub(crate) fn vec<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(de)?;
    Ok(coerce_vec(value))
}

/// `None` for null or anything that does not decode as `T`.
pub(crate) fn option<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(de)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<T>(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed optional field");
            Ok(None)
        }
    }
}

/// Absent for null or non-sequences; a sequence keeps only its string elements.
pub(crate) fn string_list<'de, D>(de: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    match value {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        Value::Null => Ok(None),
        other => {
            warn!(found = kind_of(&other), "Expected a list of strings; treating as absent");
            Ok(None)
        }
    }
}

/// Strings pass through, numbers and bools are stringified, anything else is empty.
pub(crate) fn string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

pub(crate) fn optional_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}
