//! Field decoders for server payloads that carry unchecked model output.
//!
//! Display-only fields never fail a whole response: a wrong type or `null`
//! falls back to the field's default, or to the value's JSON text.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::scene::Item;

/// JSON value as display text. Strings are unquoted; `null` is empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Any value that does not decode as `T` becomes `T::default()`.
pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(value_text(&Value::deserialize(d)?))
}

pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

/// A list of labels. A lone value counts as a one-element list; objects show
/// their `name` when they have one.
pub fn texts<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let label = |v: &Value| match v.get("name") {
        Some(Value::String(name)) => name.clone(),
        _ => value_text(v),
    };

    Ok(match Value::deserialize(d)? {
        Value::Array(values) => values
            .iter()
            .filter(|v| !v.is_null())
            .map(label)
            .collect(),
        Value::Null => Vec::new(),
        other => vec![label(&other)],
    })
}

/// Loot or inventory. Bare strings are taken as item names.
pub fn items<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Item>, D::Error> {
    let Value::Array(values) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };

    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(name) => Some(Item {
                name,
                ..Default::default()
            }),
            obj @ Value::Object(_) => serde_json::from_value(obj).ok(),
            _ => None,
        })
        .collect())
}
